// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Performer-to-group join (`Memberships`).

use boxoffice_core::{Dialect, QueryExecutor, Result, Table, validate};
use serde::{Deserialize, Serialize};

use super::{exists, insert as insert_sql, target, text};
use crate::{
    form::Record,
    mutation::{self, Applied, Check, Confirm, MutationPlan, Outcome}
};

/// Membership form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipForm {
    /// Existing performer.
    pub stage_name: String,
    /// Existing group.
    pub group_name: String
}

impl From<&Record> for MembershipForm {
    fn from(r: &Record) -> Self {
        Self {
            stage_name: r.get("stage_name").to_owned(),
            group_name: r.get("group_name").to_owned()
        }
    }
}

/// Plan adding a performer to a group.
pub fn insert_plan(dialect: Dialect, form: &MembershipForm) -> Result<MutationPlan> {
    validate::require(&[&form.stage_name, &form.group_name])?;
    let (stage, group) = (text(&form.stage_name), text(&form.group_name));
    let (stage_name, group_name) = (form.stage_name.trim(), form.group_name.trim());

    Ok(MutationPlan::insert(
        Table::Memberships,
        insert_sql(dialect, Table::Memberships, vec![stage.clone(), group.clone()])
    )
    .check(Check::unique(
        exists(
            dialect,
            Table::Memberships,
            &["stage_name", "group_name"],
            vec![stage.clone(), group.clone()]
        ),
        format!("Membership for {stage_name} and {group_name} already exists.")
    ))
    .check(Check::referenced(
        exists(
            dialect,
            Table::IndividualPerformers,
            &["stage_name"],
            vec![stage]
        ),
        format!(
            "Stage name {stage_name} does not exist. Please select a valid stage name. \
             You may have to create a performer in 'IndividualPerformers'"
        )
    ))
    .check(Check::referenced(
        exists(dialect, Table::Groups, &["group_name"], vec![group]),
        format!(
            "Group name {group_name} does not exist. Please select a valid group name. \
             You may have to create a group in 'Groups'"
        )
    )))
}

/// Plan removing a performer from a group.
pub fn delete_plan(dialect: Dialect, form: &MembershipForm) -> Result<MutationPlan> {
    validate::require(&[&form.stage_name, &form.group_name])?;
    let key = vec![text(&form.stage_name), text(&form.group_name)];
    let (stage_name, group_name) = (form.stage_name.trim(), form.group_name.trim());

    Ok(MutationPlan::delete(
        Table::Memberships,
        target(
            dialect,
            Table::Memberships,
            key.clone(),
            format!(
                "Membership with stage name {stage_name} and group name {group_name} not found."
            )
        ),
        vec![super::delete(
            dialect,
            Table::Memberships,
            &["stage_name", "group_name"],
            key
        )]
    )
    .prompt(format!(
        "Are you sure you want to remove {stage_name} from {group_name}?"
    )))
}

/// Add a performer to a group.
pub async fn insert<E>(exec: &E, form: &MembershipForm) -> Result<Applied>
where
    E: QueryExecutor + ?Sized
{
    mutation::apply(exec, insert_plan(exec.dialect(), form)?).await
}

/// Remove a performer from a group after confirmation.
pub async fn delete<E, C>(exec: &E, form: &MembershipForm, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, delete_plan(exec.dialect(), form)?, confirm).await
}
