// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared fixtures: a fresh SQLite file with the schema applied.

#![allow(dead_code)]

use boxoffice::{
    Admin, AutoConfirm, DatabaseConfig, Executor, QueryExecutor, Row, Statement, Table,
    form::Record
};
use tempfile::TempDir;

pub struct Db {
    _dir:      TempDir,
    pub admin: Admin<Executor>
}

impl Db {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let admin = Admin::new(Executor::new(DatabaseConfig::sqlite(
            dir.path().join("boxoffice.db")
        )));
        admin.init_schema().await.unwrap();
        Self {
            _dir: dir,
            admin
        }
    }

    pub fn exec(&self) -> &Executor {
        self.admin.executor()
    }

    /// Insert through the backend, panicking on failure.
    pub async fn add(&self, table: Table, fields: &[(&str, &str)]) {
        let record: Record = fields.iter().copied().collect();
        self.admin
            .insert(table, &record)
            .await
            .unwrap_or_else(|e| panic!("insert into {table} failed: {e}"));
    }

    /// Delete through the backend, accepting the confirmation.
    pub async fn remove(&self, table: Table, fields: &[(&str, &str)]) -> boxoffice::Result<bool> {
        let record: Record = fields.iter().copied().collect();
        let outcome = self.admin.delete(table, &record, &mut AutoConfirm).await?;
        Ok(outcome.is_applied())
    }

    /// Raw ticket rows, bypassing validation.
    pub async fn raw_tickets(&self, tickets: &[(i64, &str, Option<i64>, f64)]) {
        let stmts: Vec<Statement> = tickets
            .iter()
            .map(|(id, event, user, price)| {
                Statement::new(
                    "INSERT INTO `Tickets` (id, event_name, purchased_by, price) VALUES (?, ?, ?, ?)"
                )
                .bind(*id)
                .bind(*event)
                .bind(*user)
                .bind(*price)
            })
            .collect();
        self.exec().execute_all(&stmts).await.unwrap();
    }

    pub async fn rows(&self, sql: &str) -> Vec<Row> {
        self.exec().fetch_all(&Statement::new(sql)).await.unwrap()
    }

    pub async fn count(&self, table: Table) -> usize {
        self.rows(&format!("SELECT 1 FROM `{}`", table.name()))
            .await
            .len()
    }

    /// Venue `Hall` in Austin, venue `Arena` in Boston, event `Gala` at
    /// Hall, event `Fest` at Arena, users 1 and 2.
    pub async fn seeded() -> Self {
        let db = Self::new().await;
        db.add(
            Table::Venue,
            &[("venue_name", "Hall"), ("city", "Austin"), ("capacity", "500")]
        )
        .await;
        db.add(
            Table::Venue,
            &[("venue_name", "Arena"), ("city", "Boston"), ("capacity", "9000")]
        )
        .await;
        db.add(
            Table::Events,
            &[
                ("event_name", "Gala"),
                ("venue_name", "Hall"),
                ("event_date", "2022-06-01"),
                ("start_time", "19:00:00")
            ]
        )
        .await;
        db.add(
            Table::Events,
            &[
                ("event_name", "Fest"),
                ("venue_name", "Arena"),
                ("event_date", "2022-07-15"),
                ("start_time", "12:00:00")
            ]
        )
        .await;
        for (id, name) in [("1", "Ann"), ("2", "Bob")] {
            db.add(
                Table::Users,
                &[
                    ("id", id),
                    ("user_name", name),
                    ("phone_number", "5550100"),
                    ("date_of_birth", "1990-01-01")
                ]
            )
            .await;
        }
        db
    }
}

pub fn cell(row: &Row, i: usize) -> String {
    row.display(i).to_owned()
}

pub fn money(row: &Row, i: usize) -> f64 {
    row.get(i).unwrap().parse().unwrap()
}
