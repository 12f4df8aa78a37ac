// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Fixed table catalogue.
//!
//! [`Table`] is the allow-list of identifiers that may appear in SQL
//! text. Operator input selects a table by name through
//! [`FromStr`](std::str::FromStr); anything outside the catalogue is
//! rejected before a statement is built.
//!
//! | Table | Key | References |
//! |-------|-----|------------|
//! | `Users` | `id` | |
//! | `Venue` | `venue_name` | |
//! | `Events` | `event_name` | `Venue` |
//! | `Tickets` | `id`, `event_name` | `Events`, `Users` |
//! | `Groups` | `group_name` | |
//! | `IndividualPerformers` | `stage_name` | |
//! | `Memberships` | `stage_name`, `group_name` | `IndividualPerformers`, `Groups` |
//! | `PerformanceList` | `event_name`, `group_name` | `Events`, `Groups` |

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{dialect::Dialect, error::Error};

/// Storage kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Integer.
    Int,
    /// Variable-length text.
    Text,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// Time of day.
    Time,
    /// Fixed-point money amount.
    Decimal
}

impl ColumnKind {
    const fn sql_type(&self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Text => "VARCHAR(255)",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Decimal => "DECIMAL(10,2)"
        }
    }
}

/// Column definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    pub name:     &'static str,
    /// Storage kind.
    pub kind:     ColumnKind,
    /// Whether `NULL` is allowed.
    pub nullable: bool
}

const fn col(name: &'static str, kind: ColumnKind) -> Column {
    Column {
        name,
        kind,
        nullable: false
    }
}

const fn nullable(name: &'static str, kind: ColumnKind) -> Column {
    Column {
        name,
        kind,
        nullable: true
    }
}

const USERS: &[Column] = &[
    col("id", ColumnKind::Int),
    col("user_name", ColumnKind::Text),
    col("phone_number", ColumnKind::Text),
    col("date_of_birth", ColumnKind::Date)
];

const VENUE: &[Column] = &[
    col("venue_name", ColumnKind::Text),
    col("city", ColumnKind::Text),
    col("capacity", ColumnKind::Int)
];

const EVENTS: &[Column] = &[
    col("event_name", ColumnKind::Text),
    col("venue_name", ColumnKind::Text),
    col("event_date", ColumnKind::Date),
    col("start_time", ColumnKind::Time)
];

const TICKETS: &[Column] = &[
    col("id", ColumnKind::Int),
    col("event_name", ColumnKind::Text),
    nullable("purchased_by", ColumnKind::Int),
    col("price", ColumnKind::Decimal)
];

const GROUPS: &[Column] = &[
    col("group_name", ColumnKind::Text),
    col("founded", ColumnKind::Date)
];

const PERFORMERS: &[Column] = &[
    col("stage_name", ColumnKind::Text),
    col("individual_name", ColumnKind::Text),
    col("age", ColumnKind::Int)
];

const MEMBERSHIPS: &[Column] = &[
    col("stage_name", ColumnKind::Text),
    col("group_name", ColumnKind::Text)
];

const PERFORMANCES: &[Column] = &[
    col("event_name", ColumnKind::Text),
    col("group_name", ColumnKind::Text)
];

/// A table of the ticket-sales schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    /// Ticket buyers.
    Users,
    /// Venues hosting events.
    Venue,
    /// Scheduled events.
    Events,
    /// Tickets, numbered per event.
    Tickets,
    /// Performing groups.
    Groups,
    /// Solo performers.
    IndividualPerformers,
    /// Performer-to-group join.
    Memberships,
    /// Group-to-event join.
    PerformanceList
}

impl Table {
    /// Every table, in selector order.
    pub const ALL: [Table; 8] = [
        Self::Events,
        Self::Groups,
        Self::IndividualPerformers,
        Self::Memberships,
        Self::PerformanceList,
        Self::Tickets,
        Self::Users,
        Self::Venue
    ];

    /// Tables with non-key columns, the only ones that can be updated.
    pub const UPDATABLE: [Table; 6] = [
        Self::Events,
        Self::Groups,
        Self::IndividualPerformers,
        Self::Tickets,
        Self::Users,
        Self::Venue
    ];

    /// Table identifier as stored in the database.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Venue => "Venue",
            Self::Events => "Events",
            Self::Tickets => "Tickets",
            Self::Groups => "Groups",
            Self::IndividualPerformers => "IndividualPerformers",
            Self::Memberships => "Memberships",
            Self::PerformanceList => "PerformanceList"
        }
    }

    /// Column definitions in storage order.
    pub const fn columns(&self) -> &'static [Column] {
        match self {
            Self::Users => USERS,
            Self::Venue => VENUE,
            Self::Events => EVENTS,
            Self::Tickets => TICKETS,
            Self::Groups => GROUPS,
            Self::IndividualPerformers => PERFORMERS,
            Self::Memberships => MEMBERSHIPS,
            Self::PerformanceList => PERFORMANCES
        }
    }

    /// Primary key column names.
    pub const fn primary_key(&self) -> &'static [&'static str] {
        match self {
            Self::Users => &["id"],
            Self::Tickets => &["id", "event_name"],
            Self::Venue => &["venue_name"],
            Self::Events => &["event_name"],
            Self::Groups => &["group_name"],
            Self::IndividualPerformers => &["stage_name"],
            Self::Memberships => &["stage_name", "group_name"],
            Self::PerformanceList => &["event_name", "group_name"]
        }
    }

    /// Foreign keys as `(column, referenced table, referenced column)`.
    pub const fn references(&self) -> &'static [(&'static str, Table, &'static str)] {
        match self {
            Self::Events => &[("venue_name", Self::Venue, "venue_name")],
            Self::Tickets => &[
                ("event_name", Self::Events, "event_name"),
                ("purchased_by", Self::Users, "id")
            ],
            Self::Memberships => &[
                ("stage_name", Self::IndividualPerformers, "stage_name"),
                ("group_name", Self::Groups, "group_name")
            ],
            Self::PerformanceList => &[
                ("event_name", Self::Events, "event_name"),
                ("group_name", Self::Groups, "group_name")
            ],
            Self::Users | Self::Venue | Self::Groups | Self::IndividualPerformers => &[]
        }
    }

    /// Check if the table has columns outside its key.
    pub fn is_updatable(&self) -> bool {
        self.columns().len() > self.primary_key().len()
    }

    /// Quoted identifier for SQL text.
    pub fn ident(&self, dialect: Dialect) -> String {
        dialect.quote(self.name())
    }

    /// Column names in storage order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.name).collect()
    }

    /// Projection rendering every column as text.
    pub fn text_projection(&self, dialect: Dialect) -> String {
        self.columns()
            .iter()
            .map(|c| match c.kind {
                ColumnKind::Text => c.name.to_owned(),
                _ => dialect.text(c.name)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `CREATE TABLE IF NOT EXISTS` statement.
    ///
    /// The same DDL is accepted by MySQL/MariaDB and SQLite.
    pub fn create_sql(&self, dialect: Dialect) -> String {
        let mut parts: Vec<String> = self
            .columns()
            .iter()
            .map(|c| {
                let null = if c.nullable { "NULL" } else { "NOT NULL" };
                format!("{} {} {}", c.name, c.kind.sql_type(), null)
            })
            .collect();

        parts.push(format!("PRIMARY KEY ({})", self.primary_key().join(", ")));
        for (column, target, target_column) in self.references() {
            parts.push(format!(
                "FOREIGN KEY ({}) REFERENCES {} ({})",
                column,
                target.ident(dialect),
                target_column
            ));
        }
        match self {
            Self::Tickets => parts.push("CHECK (price > 0)".to_owned()),
            Self::IndividualPerformers => parts.push("CHECK (age BETWEEN 0 AND 120)".to_owned()),
            _ => {}
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.ident(dialect),
            parts.join(", ")
        )
    }

    /// DDL for the whole schema, parents before children.
    pub fn schema_sql(dialect: Dialect) -> Vec<String> {
        [
            Self::Users,
            Self::Venue,
            Self::Events,
            Self::Tickets,
            Self::Groups,
            Self::IndividualPerformers,
            Self::Memberships,
            Self::PerformanceList
        ]
        .iter()
        .map(|t| t.create_sql(dialect))
        .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = Error;

    /// Parse a table name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::validation(format!("Unknown table '{wanted}'")))
    }
}
