// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Table-driven dispatcher.
//!
//! [`Admin`] maps `(action, table, record)` onto the typed functions in
//! [`entity`](crate::entity), the way a table selector drives a form.

use boxoffice_core::{Action, Error, QueryExecutor, Result, Statement, Table};
use tracing::info;

use crate::{
    entity::{
        event::{self, EventForm},
        group::{self, GroupForm},
        membership::{self, MembershipForm},
        performance::{self, PerformanceForm},
        performer::{self, PerformerForm},
        ticket::{self, TicketForm},
        user::{self, UserForm},
        venue::{self, VenueForm}
    },
    form::{Record, TableForm},
    mutation::{Applied, Confirm, Outcome}
};

/// Admin backend over an executor.
#[derive(Debug, Clone)]
pub struct Admin<E> {
    exec: E
}

impl<E: QueryExecutor> Admin<E> {
    /// Wrap an executor.
    pub const fn new(exec: E) -> Self {
        Self {
            exec
        }
    }

    /// Underlying executor.
    pub const fn executor(&self) -> &E {
        &self.exec
    }

    /// Create every table that does not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        let ddl: Vec<Statement> = Table::schema_sql(self.exec.dialect())
            .into_iter()
            .map(Statement::new)
            .collect();
        self.exec.execute_all(&ddl).await?;
        info!(tables = ddl.len(), "schema ready");
        Ok(())
    }

    /// Insert `record` into `table`.
    pub async fn insert(&self, table: Table, record: &Record) -> Result<Applied> {
        record.check_fields(&table.form(Action::Insert))?;
        let exec = &self.exec;

        match table {
            Table::Users => user::insert(exec, &UserForm::from(record)).await,
            Table::Venue => venue::insert(exec, &VenueForm::from(record)).await,
            Table::Events => event::insert(exec, &EventForm::from(record)).await,
            Table::Tickets => ticket::insert(exec, &TicketForm::from(record)).await,
            Table::Groups => group::insert(exec, &GroupForm::from(record)).await,
            Table::IndividualPerformers => {
                performer::insert(exec, &PerformerForm::from(record)).await
            }
            Table::Memberships => membership::insert(exec, &MembershipForm::from(record)).await,
            Table::PerformanceList => {
                performance::insert(exec, &PerformanceForm::from(record)).await
            }
        }
    }

    /// Update the row of `table` keyed by `record`.
    pub async fn update<C>(&self, table: Table, record: &Record, confirm: &mut C) -> Result<Outcome>
    where
        C: Confirm + ?Sized
    {
        let fields = table.form(Action::Update);
        if fields.is_empty() {
            return Err(Error::validation(format!(
                "{table} has no columns to update"
            )));
        }
        record.check_fields(&fields)?;
        let exec = &self.exec;

        match table {
            Table::Users => user::update(exec, &UserForm::from(record), confirm).await,
            Table::Venue => venue::update(exec, &VenueForm::from(record), confirm).await,
            Table::Events => event::update(exec, &EventForm::from(record), confirm).await,
            Table::Tickets => ticket::update(exec, &TicketForm::from(record), confirm).await,
            Table::Groups => group::update(exec, &GroupForm::from(record), confirm).await,
            Table::IndividualPerformers => {
                performer::update(exec, &PerformerForm::from(record), confirm).await
            }
            Table::Memberships | Table::PerformanceList => Err(Error::validation(format!(
                "{table} has no columns to update"
            )))
        }
    }

    /// Delete the row of `table` keyed by `record`.
    pub async fn delete<C>(&self, table: Table, record: &Record, confirm: &mut C) -> Result<Outcome>
    where
        C: Confirm + ?Sized
    {
        record.check_fields(&table.form(Action::Delete))?;
        let exec = &self.exec;

        match table {
            Table::Users => user::delete(exec, record.get("id"), confirm).await,
            Table::Venue => venue::delete(exec, record.get("venue_name"), confirm).await,
            Table::Events => event::delete(exec, record.get("event_name"), confirm).await,
            Table::Tickets => {
                ticket::delete(exec, record.get("id"), record.get("event_name"), confirm).await
            }
            Table::Groups => group::delete(exec, record.get("group_name"), confirm).await,
            Table::IndividualPerformers => {
                performer::delete(exec, record.get("stage_name"), confirm).await
            }
            Table::Memberships => {
                membership::delete(exec, &MembershipForm::from(record), confirm).await
            }
            Table::PerformanceList => {
                performance::delete(exec, &PerformanceForm::from(record), confirm).await
            }
        }
    }
}
