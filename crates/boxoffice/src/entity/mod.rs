// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-entity insert, update and delete.
//!
//! Each submodule turns string form input into a
//! [`MutationPlan`](crate::mutation::MutationPlan) (pure, no I/O) and
//! offers async wrappers that run the plan against a
//! [`QueryExecutor`](boxoffice_core::QueryExecutor).
//!
//! | Module | Insert | Update | Delete |
//! |--------|--------|--------|--------|
//! | [`user`] | ✓ | name, phone, date of birth | blocked by tickets |
//! | [`venue`] | ✓ | city, capacity | blocked by events |
//! | [`event`] | ✓ | venue, date, start time | cascades performances, tickets |
//! | [`ticket`] | ✓ (id generated) | purchaser, price | ✓ |
//! | [`group`] | ✓ | founded | cascades memberships, blocked by performances |
//! | [`performer`] | ✓ | name, age | cascades memberships |
//! | [`membership`] | ✓ | | ✓ |
//! | [`performance`] | ✓ | | ✓ |

pub mod event;
pub mod group;
pub mod membership;
pub mod performance;
pub mod performer;
pub mod ticket;
pub mod user;
pub mod venue;

use boxoffice_core::{Dialect, SqlValue, Statement, Table};

use crate::mutation::Target;

/// `a = ? AND b = ?` over `columns`.
pub(crate) fn key_clause(dialect: Dialect, columns: &[&str]) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{c} = {}", dialect.placeholder(i + 1)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Probe returning one row per match on `columns`.
pub(crate) fn exists(
    dialect: Dialect,
    table: Table,
    columns: &[&str],
    values: Vec<SqlValue>
) -> Statement {
    Statement::new(format!(
        "SELECT 1 FROM {} WHERE {}",
        table.ident(dialect),
        key_clause(dialect, columns)
    ))
    .bind_all(values)
}

/// Probe returning the first column of rows matching `columns`,
/// distinct and sorted.
pub(crate) fn dependents(
    dialect: Dialect,
    table: Table,
    select: &str,
    columns: &[&str],
    values: Vec<SqlValue>
) -> Statement {
    Statement::new(format!(
        "SELECT DISTINCT {select} FROM {} WHERE {} ORDER BY {select}",
        table.ident(dialect),
        key_clause(dialect, columns)
    ))
    .bind_all(values)
}

/// The row keyed by `key`, every column as text.
pub(crate) fn target(
    dialect: Dialect,
    table: Table,
    key: Vec<SqlValue>,
    not_found: impl Into<String>
) -> Target {
    let probe = Statement::new(format!(
        "SELECT {} FROM {} WHERE {}",
        table.text_projection(dialect),
        table.ident(dialect),
        key_clause(dialect, table.primary_key())
    ))
    .bind_all(key);

    Target {
        probe,
        headers: table.column_names(),
        not_found: not_found.into()
    }
}

/// `INSERT` of every column in storage order.
pub(crate) fn insert(dialect: Dialect, table: Table, values: Vec<SqlValue>) -> Statement {
    let columns = table.column_names();
    Statement::new(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.ident(dialect),
        columns.join(", "),
        dialect.placeholders(1, columns.len())
    ))
    .bind_all(values)
}

/// `UPDATE` of `set` columns on the row keyed by the primary key.
///
/// `values` holds the new values followed by the key values.
pub(crate) fn update(dialect: Dialect, table: Table, set: &[&str], values: Vec<SqlValue>) -> Statement {
    Statement::new(format!(
        "UPDATE {} SET {} WHERE {}",
        table.ident(dialect),
        dialect.set_clause(set),
        key_clause(dialect, table.primary_key())
    ))
    .bind_all(values)
}

/// `DELETE` of rows matching `columns`.
pub(crate) fn delete(
    dialect: Dialect,
    table: Table,
    columns: &[&str],
    values: Vec<SqlValue>
) -> Statement {
    Statement::new(format!(
        "DELETE FROM {} WHERE {}",
        table.ident(dialect),
        key_clause(dialect, columns)
    ))
    .bind_all(values)
}

/// Trimmed copy of a form value.
pub(crate) fn text(raw: &str) -> SqlValue {
    SqlValue::from(raw.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_clause_joins_with_and() {
        assert_eq!(
            key_clause(Dialect::MySql, &["id", "event_name"]),
            "id = ? AND event_name = ?"
        );
    }

    #[test]
    fn target_projects_text() {
        let t = target(Dialect::MySql, Table::Users, vec![SqlValue::Int(1)], "missing");
        assert_eq!(
            t.probe.sql,
            "SELECT CAST(id AS CHAR), user_name, phone_number, CAST(date_of_birth AS CHAR) FROM `Users` WHERE id = ?"
        );
        assert_eq!(t.headers, vec!["id", "user_name", "phone_number", "date_of_birth"]);
    }

    #[test]
    fn insert_lists_every_column() {
        let stmt = insert(
            Dialect::Sqlite,
            Table::Venue,
            vec!["Hall".into(), "Austin".into(), SqlValue::Int(10)]
        );
        assert_eq!(
            stmt.sql,
            "INSERT INTO `Venue` (venue_name, city, capacity) VALUES (?, ?, ?)"
        );
        assert_eq!(stmt.params.len(), 3);
    }

    #[test]
    fn update_sets_then_keys() {
        let stmt = update(
            Dialect::MySql,
            Table::Tickets,
            &["purchased_by", "price"],
            vec![SqlValue::Null, SqlValue::Real(5.0), SqlValue::Int(1), "Gala".into()]
        );
        assert_eq!(
            stmt.sql,
            "UPDATE `Tickets` SET purchased_by = ?, price = ? WHERE id = ? AND event_name = ?"
        );
    }
}
