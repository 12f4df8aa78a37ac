// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tickets, numbered per event.
//!
//! A ticket is keyed by `(id, event_name)`. New ids are generated as one
//! past the highest id already issued for the same event, starting at 1.
//! An empty purchaser (or `N/A`, `NULL`) means the ticket is unsold.

use boxoffice_core::{Dialect, Error, QueryExecutor, Result, SqlValue, Statement, Table, validate};
use serde::{Deserialize, Serialize};

use super::{exists, insert as insert_sql, target, text, update as update_sql};
use crate::{
    form::Record,
    mutation::{self, Applied, Check, Confirm, MutationPlan, Outcome}
};

/// Ticket form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketForm {
    /// Ticket number within the event; ignored on insert.
    pub id:           String,
    /// Existing event.
    pub event_name:   String,
    /// Existing user id, or blank / `N/A` / `NULL`.
    pub purchased_by: String,
    /// Positive price.
    pub price:        String
}

impl From<&Record> for TicketForm {
    fn from(r: &Record) -> Self {
        Self {
            id:           r.get("id").to_owned(),
            event_name:   r.get("event_name").to_owned(),
            purchased_by: r.get("purchased_by").to_owned(),
            price:        r.get("price").to_owned()
        }
    }
}

struct Valid {
    event:     SqlValue,
    purchaser: Option<i64>,
    price:     f64
}

fn check(form: &TicketForm) -> Result<Valid> {
    validate::require(&[&form.event_name, &form.price])?;
    Ok(Valid {
        event:     text(&form.event_name),
        purchaser: validate::purchaser(&form.purchased_by)?,
        price:     validate::price(&form.price)?
    })
}

fn purchaser_check(dialect: Dialect, purchaser: Option<i64>) -> Option<Check> {
    purchaser.map(|user| {
        Check::referenced(
            exists(dialect, Table::Users, &["id"], vec![user.into()]),
            format!("User with ID {user} does not exist. Please select a valid user.")
        )
    })
}

/// Query for the next ticket id of an event.
pub fn next_id_statement(dialect: Dialect, event_name: &str) -> Statement {
    Statement::new(format!(
        "SELECT {} FROM {} WHERE event_name = {}",
        dialect.text("COALESCE(MAX(id), 0) + 1"),
        Table::Tickets.ident(dialect),
        dialect.placeholder(1)
    ))
    .bind(event_name.trim())
}

/// Next ticket id for an event: highest issued id plus one, or 1.
pub async fn next_id<E>(exec: &E, event_name: &str) -> Result<i64>
where
    E: QueryExecutor + ?Sized
{
    let row = exec
        .fetch_optional(&next_id_statement(exec.dialect(), event_name))
        .await?;
    match row.as_ref().and_then(|r| r.get(0)) {
        Some(raw) => validate::integer(raw, "Ticket ID"),
        None => Ok(1)
    }
}

/// Plan inserting a ticket under the already generated `id`.
pub fn insert_plan(dialect: Dialect, form: &TicketForm, id: i64) -> Result<MutationPlan> {
    let v = check(form)?;
    let event_check = Check::referenced(
        exists(dialect, Table::Events, &["event_name"], vec![v.event.clone()]),
        format!(
            "Event name {} does not exist. Please select a valid event.",
            form.event_name.trim()
        )
    );
    let purchaser = purchaser_check(dialect, v.purchaser);
    let stmt = insert_sql(
        dialect,
        Table::Tickets,
        vec![id.into(), v.event, v.purchaser.into(), v.price.into()]
    );

    let mut plan = MutationPlan::insert(Table::Tickets, stmt)
        .check(event_check)
        .success(format!("Inserted successfully. Generated Ticket ID: {id}"));
    if let Some(check) = purchaser {
        plan = plan.check(check);
    }
    plan.generated_id = Some(id);
    Ok(plan)
}

fn key(form_id: &str, event_name: &str) -> Result<(i64, SqlValue)> {
    validate::require(&[form_id, event_name])?;
    Ok((validate::integer(form_id, "Ticket ID")?, text(event_name)))
}

/// Plan changing purchaser and price of a ticket.
pub fn update_plan(dialect: Dialect, form: &TicketForm) -> Result<MutationPlan> {
    let (id, event) = key(&form.id, &form.event_name)?;
    let v = check(form)?;
    let purchaser = purchaser_check(dialect, v.purchaser);
    let stmt = update_sql(
        dialect,
        Table::Tickets,
        &["purchased_by", "price"],
        vec![v.purchaser.into(), v.price.into(), id.into(), event.clone()]
    );

    let mut plan = MutationPlan::update(
        Table::Tickets,
        target(
            dialect,
            Table::Tickets,
            vec![id.into(), event],
            format!(
                "Ticket with ID {id} and event name {} not found.",
                form.event_name.trim()
            )
        ),
        stmt
    );
    if let Some(check) = purchaser {
        plan = plan.check(check);
    }
    Ok(plan)
}

/// Plan deleting one ticket.
pub fn delete_plan(dialect: Dialect, id: &str, event_name: &str) -> Result<MutationPlan> {
    let (id, event) = key(id, event_name)?;
    let event_name = event_name.trim();

    Ok(MutationPlan::delete(
        Table::Tickets,
        target(
            dialect,
            Table::Tickets,
            vec![id.into(), event.clone()],
            format!("Ticket with ID {id} and event name {event_name} not found.")
        ),
        vec![super::delete(
            dialect,
            Table::Tickets,
            &["id", "event_name"],
            vec![id.into(), event]
        )]
    )
    .prompt(format!(
        "Are you sure you want to delete ticket {id} for {event_name}?"
    )))
}

/// Insert a ticket and return the generated id.
pub async fn insert<E>(exec: &E, form: &TicketForm) -> Result<Applied>
where
    E: QueryExecutor + ?Sized
{
    if form.event_name.trim().is_empty() {
        return Err(Error::validation(validate::ALL_FIELDS_REQUIRED));
    }
    let id = next_id(exec, &form.event_name).await?;
    mutation::apply(exec, insert_plan(exec.dialect(), form, id)?).await
}

/// Update a ticket after confirmation.
pub async fn update<E, C>(exec: &E, form: &TicketForm, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, update_plan(exec.dialect(), form)?, confirm).await
}

/// Delete a ticket after confirmation.
pub async fn delete<E, C>(exec: &E, id: &str, event_name: &str, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, delete_plan(exec.dialect(), id, event_name)?, confirm).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(purchaser: &str) -> TicketForm {
        TicketForm {
            id:           String::new(),
            event_name:   "Gala".into(),
            purchased_by: purchaser.into(),
            price:        "25".into()
        }
    }

    #[test]
    fn unsold_ticket_binds_null_and_skips_user_check() {
        let plan = insert_plan(Dialect::MySql, &form("N/A"), 3).unwrap();
        assert_eq!(plan.checks.len(), 1);
        assert_eq!(plan.statements[0].params[2], SqlValue::Null);
        assert_eq!(plan.generated_id, Some(3));
    }

    #[test]
    fn sold_ticket_checks_user() {
        let plan = insert_plan(Dialect::MySql, &form("4"), 1).unwrap();
        assert_eq!(plan.checks.len(), 2);
        assert_eq!(plan.statements[0].params[2], SqlValue::Int(4));
    }

    #[test]
    fn price_must_be_positive() {
        let mut f = form("");
        f.price = "0".into();
        assert!(insert_plan(Dialect::MySql, &f, 1).is_err());
    }

    #[test]
    fn update_keys_on_id_and_event() {
        let mut f = form("");
        f.id = "2".into();
        let plan = update_plan(Dialect::MySql, &f).unwrap();
        let params = &plan.statements[0].params;
        assert_eq!(params[2], SqlValue::Int(2));
        assert_eq!(params[3], SqlValue::from("Gala"));
    }

    #[test]
    fn update_requires_id() {
        assert!(update_plan(Dialect::MySql, &form("")).unwrap_err().is_validation());
    }

    #[test]
    fn next_id_statement_is_scoped_to_event() {
        let stmt = next_id_statement(Dialect::Sqlite, " Gala ");
        assert_eq!(
            stmt.sql,
            "SELECT CAST(COALESCE(MAX(id), 0) + 1 AS TEXT) FROM `Tickets` WHERE event_name = ?"
        );
        assert_eq!(stmt.params, vec![SqlValue::from("Gala")]);
    }
}
