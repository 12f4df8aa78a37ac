// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use boxoffice_core::prelude::*;
//! ```

pub use crate::{
    Action, DatabaseConfig, Dialect, Error, Executor, Predicate, QueryExecutor, Result, Row,
    SqlValue, Statement, Table, TicketFilter, async_trait
};
