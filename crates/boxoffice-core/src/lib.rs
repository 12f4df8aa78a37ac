// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core types for the boxoffice admin backend.
//!
//! This crate holds everything that talks to the database or checks
//! operator input, independent of any front end.
//!
//! # Overview
//!
//! - [`DatabaseConfig`] — Explicit connection settings
//! - [`Dialect`] — Per-engine SQL differences
//! - [`QueryExecutor`] / [`Executor`] — One connection per call, bound
//!   parameters, transactional writes
//! - [`TicketFilter`] — Dynamic WHERE clause for ticket searches
//! - [`Table`] — Allow-list of table identifiers and the schema DDL
//! - [`validate`] — Pure field checks
//! - [`Error`] — Operator-facing error taxonomy
//! - [`prelude`] — Convenient re-exports
//!
//! # Usage
//!
//! ```rust,ignore
//! use boxoffice_core::prelude::*;
//!
//! let exec = Executor::new(DatabaseConfig::sqlite("tickets.db"));
//! let filter = TicketFilter::parse("20", "", true, vec![])?;
//! let predicate = filter.build(exec.dialect());
//! let stmt = Statement::new(format!("SELECT id FROM Tickets WHERE {}", predicate.clause))
//!     .bind_all(predicate.params);
//! let rows = exec.fetch_all(&stmt).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod config;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod predicate;
pub mod prelude;
pub mod schema;
pub mod transaction;
pub mod validate;
pub mod value;

pub use action::Action;
/// Re-export async_trait for executor implementations.
pub use async_trait::async_trait;
pub use config::{DEFAULT_CONFIG_FILE, DatabaseConfig};
pub use dialect::Dialect;
pub use error::{DatabaseError, Error, Result};
pub use executor::{Executor, QueryExecutor};
pub use predicate::{Predicate, TicketFilter};
pub use schema::{Column, ColumnKind, Table};
pub use transaction::TransactionError;
pub use value::{Row, SqlValue, Statement};
