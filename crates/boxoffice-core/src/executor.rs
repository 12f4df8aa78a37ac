// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query executor.
//!
//! Each call opens its own connection, runs one statement (or one
//! transactional batch) with positionally bound parameters, and closes
//! the connection before returning, whatever the outcome. There is no
//! pool and no connection is shared between calls.
//!
//! | Method | Transaction | Returns |
//! |--------|-------------|---------|
//! | [`fetch_all`](QueryExecutor::fetch_all) | none | all rows in order |
//! | [`fetch_optional`](QueryExecutor::fetch_optional) | none | first row |
//! | [`execute`](QueryExecutor::execute) | committed | affected rows |
//! | [`execute_all`](QueryExecutor::execute_all) | one for the batch | affected rows |

use std::sync::Once;

use async_trait::async_trait;
use sqlx::{
    Any, AnyConnection, Connection, Row as _,
    any::{AnyArguments, AnyConnectOptions, AnyRow},
    query::Query
};
use tracing::{debug, error, warn};

use crate::{
    config::DatabaseConfig,
    dialect::Dialect,
    error::{DatabaseError, Error, Result},
    transaction::run_batch,
    value::{Row, SqlValue, Statement}
};

/// Database access seam used by every admin operation.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Dialect of the connected engine.
    fn dialect(&self) -> Dialect;

    /// Run a query and return every row in statement order.
    async fn fetch_all(&self, stmt: &Statement) -> Result<Vec<Row>>;

    /// Run a write and commit it. Returns affected rows.
    async fn execute(&self, stmt: &Statement) -> Result<u64>;

    /// Run several writes in one transaction and commit them together.
    async fn execute_all(&self, stmts: &[Statement]) -> Result<u64>;

    /// Run a query and return its first row, if any.
    async fn fetch_optional(&self, stmt: &Statement) -> Result<Option<Row>> {
        Ok(self.fetch_all(stmt).await?.into_iter().next())
    }
}

/// Executor opening one connection per call.
#[derive(Debug, Clone)]
pub struct Executor {
    config: DatabaseConfig
}

static DRIVERS: Once = Once::new();

impl Executor {
    /// Create an executor for the given settings.
    pub fn new(config: DatabaseConfig) -> Self {
        DRIVERS.call_once(sqlx::any::install_default_drivers);
        Self {
            config
        }
    }

    /// Connection settings.
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    async fn connect(&self) -> Result<AnyConnection> {
        let options: AnyConnectOptions = self.config.connect_options()?;
        AnyConnection::connect_with(&options).await.map_err(|e| {
            error!(error = %e, backend = ?self.config.backend, "connection failed");
            Error::Database(DatabaseError::Unavailable(e))
        })
    }

    async fn release(conn: AnyConnection) {
        if let Err(e) = conn.close().await {
            warn!(error = %e, "closing connection failed");
        }
    }
}

#[async_trait]
impl QueryExecutor for Executor {
    fn dialect(&self) -> Dialect {
        self.config.backend
    }

    async fn fetch_all(&self, stmt: &Statement) -> Result<Vec<Row>> {
        let mut conn = self.connect().await?;
        debug!(sql = %stmt.sql, params = stmt.params.len(), "fetch");

        let result = bind(stmt).fetch_all(&mut conn).await;
        Self::release(conn).await;

        let rows = result.map_err(|e| {
            error!(error = %e, sql = %stmt.sql, "query failed");
            DatabaseError::QueryFailed(e)
        })?;
        rows.iter()
            .map(decode_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Database(DatabaseError::QueryFailed(e)))
    }

    async fn execute(&self, stmt: &Statement) -> Result<u64> {
        self.execute_all(std::slice::from_ref(stmt)).await
    }

    async fn execute_all(&self, stmts: &[Statement]) -> Result<u64> {
        let mut conn = self.connect().await?;
        let result = run_batch(&mut conn, stmts).await;
        Self::release(conn).await;

        result.map_err(|e| {
            error!(error = %e, statements = stmts.len(), "write failed");
            Error::from(e)
        })
    }
}

/// Bind a statement's parameters in order.
pub(crate) fn bind(stmt: &Statement) -> Query<'_, Any, AnyArguments<'_>> {
    stmt.params
        .iter()
        .fold(sqlx::query(&stmt.sql), |q, value| match value {
            SqlValue::Null => q.bind(None::<String>),
            SqlValue::Int(v) => q.bind(*v),
            SqlValue::Real(v) => q.bind(*v),
            SqlValue::Text(v) => q.bind(v.clone())
        })
}

/// Render every cell of a driver row as text.
fn decode_row(row: &AnyRow) -> std::result::Result<Row, sqlx::Error> {
    (0..row.len())
        .map(|i| decode_cell(row, i))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(Row)
}

fn decode_cell(row: &AnyRow, index: usize) -> std::result::Result<Option<String>, sqlx::Error> {
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return Ok(v);
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
        return Ok(v.map(|v| v.to_string()));
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
        return Ok(v.map(|v| v.to_string()));
    }
    row.try_get::<Option<bool>, _>(index)
        .map(|v| v.map(|v| v.to_string()))
}
