// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Group-to-event join (`PerformanceList`).

use boxoffice_core::{Dialect, QueryExecutor, Result, Table, validate};
use serde::{Deserialize, Serialize};

use super::{exists, insert as insert_sql, target, text};
use crate::{
    form::Record,
    mutation::{self, Applied, Check, Confirm, MutationPlan, Outcome}
};

/// Performance form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceForm {
    /// Existing event.
    pub event_name: String,
    /// Existing group.
    pub group_name: String
}

impl From<&Record> for PerformanceForm {
    fn from(r: &Record) -> Self {
        Self {
            event_name: r.get("event_name").to_owned(),
            group_name: r.get("group_name").to_owned()
        }
    }
}

/// Plan booking a group for an event.
pub fn insert_plan(dialect: Dialect, form: &PerformanceForm) -> Result<MutationPlan> {
    validate::require(&[&form.event_name, &form.group_name])?;
    let (event, group) = (text(&form.event_name), text(&form.group_name));
    let (event_name, group_name) = (form.event_name.trim(), form.group_name.trim());

    Ok(MutationPlan::insert(
        Table::PerformanceList,
        insert_sql(
            dialect,
            Table::PerformanceList,
            vec![event.clone(), group.clone()]
        )
    )
    .check(Check::unique(
        exists(
            dialect,
            Table::PerformanceList,
            &["event_name", "group_name"],
            vec![event.clone(), group.clone()]
        ),
        "Entry already exists. Please provide unique Event and Group names."
    ))
    .check(Check::referenced(
        exists(dialect, Table::Events, &["event_name"], vec![event]),
        format!(
            "Event name {event_name} does not exist. Please select a valid event. \
             You may have to create an Event first in 'Events'"
        )
    ))
    .check(Check::referenced(
        exists(dialect, Table::Groups, &["group_name"], vec![group]),
        format!(
            "Group name {group_name} does not exist. Please select a valid group. \
             You may have to create a Group first in 'Groups'"
        )
    )))
}

/// Plan cancelling a group's performance at an event.
pub fn delete_plan(dialect: Dialect, form: &PerformanceForm) -> Result<MutationPlan> {
    validate::require(&[&form.event_name, &form.group_name])?;
    let key = vec![text(&form.event_name), text(&form.group_name)];
    let (event_name, group_name) = (form.event_name.trim(), form.group_name.trim());

    Ok(MutationPlan::delete(
        Table::PerformanceList,
        target(
            dialect,
            Table::PerformanceList,
            key.clone(),
            format!(
                "Performance with event name '{event_name}' and group name '{group_name}' not found."
            )
        ),
        vec![super::delete(
            dialect,
            Table::PerformanceList,
            &["event_name", "group_name"],
            key
        )]
    )
    .prompt(format!(
        "Are you sure you want to remove {group_name} from {event_name}?"
    )))
}

/// Book a group for an event.
pub async fn insert<E>(exec: &E, form: &PerformanceForm) -> Result<Applied>
where
    E: QueryExecutor + ?Sized
{
    mutation::apply(exec, insert_plan(exec.dialect(), form)?).await
}

/// Cancel a performance after confirmation.
pub async fn delete<E, C>(exec: &E, form: &PerformanceForm, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, delete_plan(exec.dialect(), form)?, confirm).await
}
