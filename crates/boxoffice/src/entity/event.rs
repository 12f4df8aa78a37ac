// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Scheduled events.
//!
//! Deleting an event removes its performances and tickets first, all in
//! the same transaction as the event row.

use boxoffice_core::{Dialect, QueryExecutor, Result, SqlValue, Table, validate};
use serde::{Deserialize, Serialize};

use super::{exists, insert as insert_sql, target, text, update as update_sql};
use crate::{
    form::Record,
    mutation::{self, Applied, Check, Confirm, MutationPlan, Outcome}
};

/// Event form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventForm {
    /// Unique event name.
    pub event_name: String,
    /// Existing venue.
    pub venue_name: String,
    /// `YYYY-MM-DD`.
    pub event_date: String,
    /// Time of day, e.g. `19:30:00`.
    pub start_time: String
}

impl From<&Record> for EventForm {
    fn from(r: &Record) -> Self {
        Self {
            event_name: r.get("event_name").to_owned(),
            venue_name: r.get("venue_name").to_owned(),
            event_date: r.get("event_date").to_owned(),
            start_time: r.get("start_time").to_owned()
        }
    }
}

struct Valid {
    name:  SqlValue,
    venue: SqlValue,
    date:  String,
    start: SqlValue
}

fn check(form: &EventForm) -> Result<Valid> {
    validate::require(&[
        &form.event_name,
        &form.venue_name,
        &form.event_date,
        &form.start_time
    ])?;
    Ok(Valid {
        name:  text(&form.event_name),
        venue: text(&form.venue_name),
        date:  validate::date(&form.event_date)?,
        start: text(&form.start_time)
    })
}

fn venue_check(dialect: Dialect, venue: SqlValue, venue_name: &str) -> Check {
    Check::referenced(
        exists(dialect, Table::Venue, &["venue_name"], vec![venue]),
        format!(
            "Venue name {} does not exist. Please select a valid venue. \
             You may have to create a venue first in 'Venue'",
            venue_name.trim()
        )
    )
}

/// Plan inserting an event at an existing venue.
pub fn insert_plan(dialect: Dialect, form: &EventForm) -> Result<MutationPlan> {
    let v = check(form)?;
    let duplicate = exists(dialect, Table::Events, &["event_name"], vec![v.name.clone()]);
    let venue = venue_check(dialect, v.venue.clone(), &form.venue_name);
    let stmt = insert_sql(
        dialect,
        Table::Events,
        vec![v.name, v.venue, v.date.into(), v.start]
    );

    Ok(MutationPlan::insert(Table::Events, stmt)
        .check(Check::unique(
            duplicate,
            format!(
                "Event name {} already exists. Please select a new name.",
                form.event_name.trim()
            )
        ))
        .check(venue))
}

/// Plan moving an event to another venue, date or start time.
pub fn update_plan(dialect: Dialect, form: &EventForm) -> Result<MutationPlan> {
    let v = check(form)?;
    let venue = venue_check(dialect, v.venue.clone(), &form.venue_name);
    let stmt = update_sql(
        dialect,
        Table::Events,
        &["venue_name", "event_date", "start_time"],
        vec![v.venue, v.date.into(), v.start, v.name.clone()]
    );

    Ok(MutationPlan::update(
        Table::Events,
        target(
            dialect,
            Table::Events,
            vec![v.name],
            format!("Event with name {} not found.", form.event_name.trim())
        ),
        stmt
    )
    .check(venue))
}

/// Plan deleting an event with its performances and tickets.
pub fn delete_plan(dialect: Dialect, event_name: &str) -> Result<MutationPlan> {
    validate::require(&[event_name])?;
    let name = text(event_name);
    let event_name = event_name.trim();

    let cascade = vec![
        super::delete(
            dialect,
            Table::PerformanceList,
            &["event_name"],
            vec![name.clone()]
        ),
        super::delete(dialect, Table::Tickets, &["event_name"], vec![name.clone()]),
        super::delete(dialect, Table::Events, &["event_name"], vec![name.clone()]),
    ];

    Ok(MutationPlan::delete(
        Table::Events,
        target(
            dialect,
            Table::Events,
            vec![name],
            format!("Event with name {event_name} not found.")
        ),
        cascade
    )
    .prompt(format!(
        "Are you sure you want to delete event {event_name}? \
         Its tickets and performances will be deleted too."
    )))
}

/// Insert an event.
pub async fn insert<E>(exec: &E, form: &EventForm) -> Result<Applied>
where
    E: QueryExecutor + ?Sized
{
    mutation::apply(exec, insert_plan(exec.dialect(), form)?).await
}

/// Update an event after confirmation.
pub async fn update<E, C>(exec: &E, form: &EventForm, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, update_plan(exec.dialect(), form)?, confirm).await
}

/// Delete an event and its dependants after confirmation.
pub async fn delete<E, C>(exec: &E, event_name: &str, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, delete_plan(exec.dialect(), event_name)?, confirm).await
}
