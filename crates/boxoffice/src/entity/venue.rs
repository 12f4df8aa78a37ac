// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Venues hosting events.

use boxoffice_core::{Dialect, QueryExecutor, Result, SqlValue, Table, validate};
use serde::{Deserialize, Serialize};

use super::{dependents, exists, insert as insert_sql, target, text, update as update_sql};
use crate::{
    form::Record,
    mutation::{self, Applied, Check, Confirm, MutationPlan, Outcome}
};

/// Venue form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueForm {
    /// Unique venue name.
    pub venue_name: String,
    /// City the venue is in.
    pub city:       String,
    /// Non-negative seat count.
    pub capacity:   String
}

impl From<&Record> for VenueForm {
    fn from(r: &Record) -> Self {
        Self {
            venue_name: r.get("venue_name").to_owned(),
            city:       r.get("city").to_owned(),
            capacity:   r.get("capacity").to_owned()
        }
    }
}

fn check(form: &VenueForm) -> Result<(SqlValue, SqlValue, i64)> {
    validate::require(&[&form.venue_name, &form.city, &form.capacity])?;
    Ok((
        text(&form.venue_name),
        text(&form.city),
        validate::capacity(&form.capacity)?
    ))
}

/// Plan inserting a venue.
pub fn insert_plan(dialect: Dialect, form: &VenueForm) -> Result<MutationPlan> {
    let (name, city, capacity) = check(form)?;
    let probe = exists(dialect, Table::Venue, &["venue_name"], vec![name.clone()]);
    let stmt = insert_sql(dialect, Table::Venue, vec![name, city, capacity.into()]);

    Ok(MutationPlan::insert(Table::Venue, stmt).check(Check::unique(
        probe,
        format!(
            "Venue name {} already exists. Please select a new name.",
            form.venue_name.trim()
        )
    )))
}

/// Plan updating city and capacity of a venue.
pub fn update_plan(dialect: Dialect, form: &VenueForm) -> Result<MutationPlan> {
    let (name, city, capacity) = check(form)?;
    let stmt = update_sql(
        dialect,
        Table::Venue,
        &["city", "capacity"],
        vec![city, capacity.into(), name.clone()]
    );

    Ok(MutationPlan::update(
        Table::Venue,
        target(
            dialect,
            Table::Venue,
            vec![name],
            format!("Venue with name {} not found.", form.venue_name.trim())
        ),
        stmt
    ))
}

/// Plan deleting a venue; refused while events are held there.
pub fn delete_plan(dialect: Dialect, venue_name: &str) -> Result<MutationPlan> {
    validate::require(&[venue_name])?;
    let name = text(venue_name);
    let venue_name = venue_name.trim();

    Ok(MutationPlan::delete(
        Table::Venue,
        target(
            dialect,
            Table::Venue,
            vec![name.clone()],
            format!("Venue with name {venue_name} not found.")
        ),
        vec![super::delete(
            dialect,
            Table::Venue,
            &["venue_name"],
            vec![name.clone()]
        )]
    )
    .check(Check::no_dependents(
        dependents(dialect, Table::Events, "event_name", &["venue_name"], vec![name]),
        format!("Cannot delete venue {venue_name}. Delete these associated events first:")
    ))
    .prompt(format!("Are you sure you want to delete venue {venue_name}?")))
}

/// Insert a venue.
pub async fn insert<E>(exec: &E, form: &VenueForm) -> Result<Applied>
where
    E: QueryExecutor + ?Sized
{
    mutation::apply(exec, insert_plan(exec.dialect(), form)?).await
}

/// Update a venue after confirmation.
pub async fn update<E, C>(exec: &E, form: &VenueForm, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, update_plan(exec.dialect(), form)?, confirm).await
}

/// Delete a venue after confirmation.
pub async fn delete<E, C>(exec: &E, venue_name: &str, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, delete_plan(exec.dialect(), venue_name)?, confirm).await
}
