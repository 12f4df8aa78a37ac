// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Atomic write batches.
//!
//! Every write goes through [`run_batch`]. A single update is a batch of
//! one; a cascading delete is a batch of several. Either the whole batch
//! commits or nothing from it persists.

use std::error::Error as StdError;

use sqlx::{AnyConnection, Connection};
use thiserror::Error as ThisError;
use tracing::{debug, warn};

use crate::{executor::bind, value::Statement};

/// Phase of a write batch that failed.
#[derive(Debug, ThisError)]
pub enum TransactionError<E>
where
    E: StdError + 'static
{
    /// The transaction could not be opened.
    #[error("could not begin transaction: {0}")]
    Begin(#[source] E),

    /// Statement `index` of the batch failed; the batch was rolled back.
    #[error("statement {index} of the batch failed: {source}")]
    Operation {
        /// Zero-based position in the batch.
        index:  usize,
        /// Driver error.
        source: E
    },

    /// Every statement ran but the commit failed.
    #[error("could not commit transaction: {0}")]
    Commit(#[source] E)
}

impl<E> TransactionError<E>
where
    E: StdError + 'static
{
    /// Underlying driver error.
    pub fn into_inner(self) -> E {
        match self {
            Self::Begin(e) | Self::Commit(e) => e,
            Self::Operation {
                source, ..
            } => source
        }
    }
}

/// Execute `statements` in one transaction and commit.
///
/// Returns the total number of affected rows.
pub async fn run_batch(
    conn: &mut AnyConnection,
    statements: &[Statement]
) -> Result<u64, TransactionError<sqlx::Error>> {
    let mut tx = conn.begin().await.map_err(TransactionError::Begin)?;
    let mut affected = 0;

    for (index, stmt) in statements.iter().enumerate() {
        debug!(index, sql = %stmt.sql, params = stmt.params.len(), "execute");
        let source = match bind(stmt).execute(&mut *tx).await {
            Ok(done) => {
                affected += done.rows_affected();
                continue;
            }
            Err(e) => e
        };
        if let Err(rollback) = tx.rollback().await {
            warn!(error = %rollback, "rollback failed");
        }
        return Err(TransactionError::Operation {
            index,
            source
        });
    }

    tx.commit().await.map_err(TransactionError::Commit)?;
    Ok(affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn scratch() -> (tempfile::TempDir, AnyConnection) {
        sqlx::any::install_default_drivers();
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("t.db").display());
        let mut conn = AnyConnection::connect(&url).await.unwrap();
        run_batch(
            &mut conn,
            &[Statement::new("CREATE TABLE t (id INTEGER PRIMARY KEY)")]
        )
        .await
        .unwrap();
        (dir, conn)
    }

    async fn count(conn: &mut AnyConnection) -> usize {
        bind(&Statement::new("SELECT id FROM t"))
            .fetch_all(&mut *conn)
            .await
            .unwrap()
            .len()
    }

    #[tokio::test]
    async fn batch_commits_together() {
        let (_dir, mut conn) = scratch().await;
        let stmts = [
            Statement::new("INSERT INTO t (id) VALUES (?)").bind(1_i64),
            Statement::new("INSERT INTO t (id) VALUES (?)").bind(2_i64)
        ];
        assert_eq!(run_batch(&mut conn, &stmts).await.unwrap(), 2);
        assert_eq!(count(&mut conn).await, 2);
    }

    #[tokio::test]
    async fn failing_statement_rolls_back_batch() {
        let (_dir, mut conn) = scratch().await;
        let stmts = [
            Statement::new("INSERT INTO t (id) VALUES (?)").bind(1_i64),
            Statement::new("INSERT INTO t (id) VALUES (?)").bind(1_i64)
        ];
        let err = run_batch(&mut conn, &stmts).await.unwrap_err();
        assert!(matches!(err, TransactionError::Operation { index: 1, .. }));
        assert!(err.to_string().starts_with("statement 1 of the batch failed"));
        assert_eq!(count(&mut conn).await, 0);
    }

    #[test]
    fn phases_expose_driver_error() {
        let err = TransactionError::Commit(std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "could not commit transaction: disk full");
        assert!(err.source().is_some());
        assert_eq!(err.into_inner().to_string(), "disk full");
    }
}
