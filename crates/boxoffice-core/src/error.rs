// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error taxonomy shared by every admin operation.
//!
//! | Variant | Cause | Mutation |
//! |---------|-------|----------|
//! | [`Error::Validation`] | Bad operator input | None |
//! | [`Error::NotFound`] | Referenced row absent | None |
//! | [`Error::DependencyConflict`] | Delete blocked by child rows | None |
//! | [`Error::Database`] | Connection or driver failure | None (not committed) |
//! | [`Error::Config`] | Connection settings unreadable | None |

use thiserror::Error as ThisError;

use crate::transaction::TransactionError;

/// Result alias for admin operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Admin operation error.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Operator input rejected.
    #[error("{0}")]
    Validation(String),

    /// Referenced row does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Delete refused while dependent rows exist.
    #[error("{message}")]
    DependencyConflict {
        /// Operator-facing explanation.
        message:  String,
        /// The rows that block the delete.
        blocking: Vec<String>
    },

    /// Database unreachable or statement failed.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String)
}

impl Error {
    /// Build a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a not-found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a dependency conflict listing the blocking rows.
    pub fn conflict(msg: impl Into<String>, blocking: Vec<String>) -> Self {
        Self::DependencyConflict {
            message: msg.into(),
            blocking
        }
    }

    /// Check if this is a validation error.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a not-found error.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a dependency conflict.
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::DependencyConflict { .. })
    }

    /// Check if this is a database error.
    pub const fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    /// Short title for notifications.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Validation Error",
            Self::NotFound(_) => "Not Found",
            Self::DependencyConflict { .. } => "Dependency Conflict",
            Self::Database(_) => "Database Error",
            Self::Config(_) => "Configuration Error"
        }
    }
}

/// Driver-level failure.
#[derive(Debug, ThisError)]
pub enum DatabaseError {
    /// Could not open a connection.
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// Statement execution failed.
    #[error("query failed: {0}")]
    QueryFailed(#[source] sqlx::Error),

    /// Transaction could not begin or commit.
    #[error("{0}")]
    Transaction(#[source] TransactionError<sqlx::Error>)
}

impl From<TransactionError<sqlx::Error>> for DatabaseError {
    fn from(err: TransactionError<sqlx::Error>) -> Self {
        match err {
            TransactionError::Operation {
                source, ..
            } => Self::QueryFailed(source),
            other => Self::Transaction(other)
        }
    }
}

impl From<TransactionError<sqlx::Error>> for Error {
    fn from(err: TransactionError<sqlx::Error>) -> Self {
        Self::Database(err.into())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn constructors_and_predicates() {
        assert!(Error::validation("x").is_validation());
        assert!(Error::not_found("x").is_not_found());
        assert!(Error::conflict("x", vec![]).is_conflict());
        assert!(!Error::validation("x").is_database());
    }

    #[test]
    fn display_is_operator_message() {
        let err = Error::validation("All fields are required");
        assert_eq!(err.to_string(), "All fields are required");

        let err = Error::conflict("blocked", vec!["Gala".into()]);
        assert_eq!(err.to_string(), "blocked");
    }

    #[test]
    fn database_error_wraps_driver_error() {
        let err: Error = DatabaseError::QueryFailed(sqlx::Error::RowNotFound).into();
        assert!(err.is_database());
        assert!(err.to_string().starts_with("query failed"));
        assert!(err.source().is_some());
    }

    #[test]
    fn operation_failure_maps_to_query_failed() {
        let err: DatabaseError = TransactionError::Operation {
            index:  0,
            source: sqlx::Error::RowNotFound
        }
        .into();
        assert!(matches!(err, DatabaseError::QueryFailed(_)));

        let err: DatabaseError = TransactionError::Commit(sqlx::Error::PoolClosed).into();
        assert!(matches!(err, DatabaseError::Transaction(_)));
        assert!(err.to_string().contains("commit"));
    }

    #[test]
    fn titles() {
        assert_eq!(Error::not_found("x").title(), "Not Found");
        assert_eq!(Error::Config("x".into()).title(), "Configuration Error");
    }
}
