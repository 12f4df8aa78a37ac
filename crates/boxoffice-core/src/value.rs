// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Statements, bound values and result rows.
//!
//! Values never reach SQL text: a [`Statement`] carries its parameters
//! next to the SQL and the executor binds them positionally.

use std::fmt;

use serde::Serialize;

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// SQL `NULL`.
    Null,

    /// Integer value.
    Int(i64),

    /// Floating point value.
    Real(f64),

    /// Text value.
    Text(String)
}

impl SqlValue {
    /// Check if this is SQL `NULL`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// SQL text plus its ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// SQL with positional placeholders.
    pub sql: String,

    /// Parameters in placeholder order.
    pub params: Vec<SqlValue>
}

impl Statement {
    /// Create a statement without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql:    sql.into(),
            params: Vec::new()
        }
    }

    /// Append a bound parameter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use boxoffice_core::Statement;
    ///
    /// let stmt = Statement::new("SELECT 1 FROM `Users` WHERE id = ?").bind(7_i64);
    /// assert_eq!(stmt.params.len(), 1);
    /// ```
    #[must_use]
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Append several bound parameters in order.
    #[must_use]
    pub fn bind_all(mut self, values: impl IntoIterator<Item = SqlValue>) -> Self {
        self.params.extend(values);
        self
    }
}

/// One result row, every cell rendered as text.
///
/// Projections cast non-text columns through
/// [`Dialect::text`](crate::Dialect::text), so a cell is either the
/// column's textual form or `None` for SQL `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row(pub Vec<Option<String>>);

impl Row {
    /// Number of cells.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cell text at `index`, `None` for `NULL` or out of range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(|c| c.as_deref())
    }

    /// Cell text at `index`, or `"NULL"`.
    pub fn display(&self, index: usize) -> &str {
        self.get(index).unwrap_or("NULL")
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<&str> = (0..self.len()).map(|i| self.display(i)).collect();
        write!(f, "({})", cells.join(", "))
    }
}

impl From<Vec<Option<String>>> for Row {
    fn from(cells: Vec<Option<String>>) -> Self {
        Self(cells)
    }
}
