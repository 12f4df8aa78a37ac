// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL dialect differences.
//!
//! This module defines [`Dialect`], which controls engine-specific SQL
//! syntax (placeholders, text casts, identifier quoting).

use serde::{Deserialize, Serialize};

/// SQL dialect of the connected engine.
///
/// # Supported Databases
///
/// | Dialect | Placeholders | Text cast | Use Case |
/// |---------|--------------|-----------|----------|
/// | MySQL / MariaDB | `?` | `CAST(x AS CHAR)` | Production |
/// | SQLite | `?` | `CAST(x AS TEXT)` | Local files, tests |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL or MariaDB.
    #[default]
    #[serde(alias = "mariadb")]
    MySql,

    /// SQLite.
    Sqlite
}

impl Dialect {
    /// Placeholder for the parameter at `index` (1-based).
    #[must_use]
    pub fn placeholder(&self, _index: usize) -> String {
        match self {
            Self::MySql | Self::Sqlite => "?".to_owned()
        }
    }

    /// Comma-separated placeholders for parameters `start..start + count`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use boxoffice_core::Dialect;
    ///
    /// assert_eq!(Dialect::Sqlite.placeholders(1, 3), "?, ?, ?");
    /// ```
    #[must_use]
    pub fn placeholders(&self, start: usize, count: usize) -> String {
        (start..start + count)
            .map(|i| self.placeholder(i))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// SET clause for an UPDATE statement, parameters starting at 1.
    #[must_use]
    pub fn set_clause(&self, fields: &[&str]) -> String {
        fields
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{} = {}", f, self.placeholder(i + 1)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Cast an expression to text for display.
    #[must_use]
    pub fn text(&self, expr: &str) -> String {
        match self {
            Self::MySql => format!("CAST({expr} AS CHAR)"),
            Self::Sqlite => format!("CAST({expr} AS TEXT)")
        }
    }

    /// Quote an identifier from the fixed schema catalogue.
    ///
    /// Backticks are understood by both engines and keep names such as
    /// `Groups` clear of reserved words.
    #[must_use]
    pub fn quote(&self, ident: &str) -> String {
        format!("`{ident}`")
    }

    /// URL scheme used by the `Any` driver.
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_positional_question_mark() {
        assert_eq!(Dialect::MySql.placeholder(1), "?");
        assert_eq!(Dialect::Sqlite.placeholder(7), "?");
    }

    #[test]
    fn placeholders_count() {
        assert_eq!(Dialect::MySql.placeholders(1, 1), "?");
        assert_eq!(Dialect::MySql.placeholders(4, 2), "?, ?");
        assert_eq!(Dialect::MySql.placeholders(1, 0), "");
    }

    #[test]
    fn set_clause_generation() {
        let clause = Dialect::Sqlite.set_clause(&["city", "capacity"]);
        assert_eq!(clause, "city = ?, capacity = ?");
    }

    #[test]
    fn text_cast_per_dialect() {
        assert_eq!(Dialect::MySql.text("price"), "CAST(price AS CHAR)");
        assert_eq!(Dialect::Sqlite.text("t.id"), "CAST(t.id AS TEXT)");
    }

    #[test]
    fn quote_uses_backticks() {
        assert_eq!(Dialect::MySql.quote("Groups"), "`Groups`");
    }

    #[test]
    fn deserialize_aliases() {
        let d: Dialect = serde_json::from_str("\"mariadb\"").unwrap();
        assert_eq!(d, Dialect::MySql);
        let d: Dialect = serde_json::from_str("\"sqlite\"").unwrap();
        assert_eq!(d, Dialect::Sqlite);
    }

    #[test]
    fn default_is_mysql() {
        assert_eq!(Dialect::default(), Dialect::MySql);
        assert_eq!(Dialect::default().scheme(), "mysql");
    }
}
