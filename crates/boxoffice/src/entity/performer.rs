// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Solo performers (`IndividualPerformers`).

use boxoffice_core::{Dialect, QueryExecutor, Result, SqlValue, Table, validate};
use serde::{Deserialize, Serialize};

use super::{exists, insert as insert_sql, target, text, update as update_sql};
use crate::{
    form::Record,
    mutation::{self, Applied, Check, Confirm, MutationPlan, Outcome}
};

/// Performer form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformerForm {
    /// Unique stage name.
    pub stage_name:      String,
    /// Legal name.
    pub individual_name: String,
    /// Integer 0–120.
    pub age:             String
}

impl From<&Record> for PerformerForm {
    fn from(r: &Record) -> Self {
        Self {
            stage_name:      r.get("stage_name").to_owned(),
            individual_name: r.get("individual_name").to_owned(),
            age:             r.get("age").to_owned()
        }
    }
}

fn check(form: &PerformerForm) -> Result<(SqlValue, SqlValue, i64)> {
    validate::require(&[&form.stage_name, &form.individual_name, &form.age])?;
    Ok((
        text(&form.stage_name),
        text(&form.individual_name),
        validate::age(&form.age)?
    ))
}

/// Plan inserting a performer.
pub fn insert_plan(dialect: Dialect, form: &PerformerForm) -> Result<MutationPlan> {
    let (stage, name, age) = check(form)?;
    let probe = exists(
        dialect,
        Table::IndividualPerformers,
        &["stage_name"],
        vec![stage.clone()]
    );

    Ok(MutationPlan::insert(
        Table::IndividualPerformers,
        insert_sql(
            dialect,
            Table::IndividualPerformers,
            vec![stage, name, age.into()]
        )
    )
    .check(Check::unique(
        probe,
        format!(
            "Stage name {} already exists. Please select a new name.",
            form.stage_name.trim()
        )
    )))
}

/// Plan changing name and age of a performer.
pub fn update_plan(dialect: Dialect, form: &PerformerForm) -> Result<MutationPlan> {
    let (stage, name, age) = check(form)?;

    Ok(MutationPlan::update(
        Table::IndividualPerformers,
        target(
            dialect,
            Table::IndividualPerformers,
            vec![stage.clone()],
            format!(
                "Individual performer with stage name {} not found.",
                form.stage_name.trim()
            )
        ),
        update_sql(
            dialect,
            Table::IndividualPerformers,
            &["individual_name", "age"],
            vec![name, age.into(), stage]
        )
    ))
}

/// Plan deleting a performer and their memberships.
pub fn delete_plan(dialect: Dialect, stage_name: &str) -> Result<MutationPlan> {
    validate::require(&[stage_name])?;
    let stage = text(stage_name);
    let stage_name = stage_name.trim();

    let cascade = vec![
        super::delete(
            dialect,
            Table::Memberships,
            &["stage_name"],
            vec![stage.clone()]
        ),
        super::delete(
            dialect,
            Table::IndividualPerformers,
            &["stage_name"],
            vec![stage.clone()]
        ),
    ];

    Ok(MutationPlan::delete(
        Table::IndividualPerformers,
        target(
            dialect,
            Table::IndividualPerformers,
            vec![stage],
            format!("Individual performer with stage name {stage_name} not found.")
        ),
        cascade
    )
    .prompt(format!(
        "Are you sure you want to delete performer {stage_name}? \
         Their memberships will be deleted too."
    )))
}

/// Insert a performer.
pub async fn insert<E>(exec: &E, form: &PerformerForm) -> Result<Applied>
where
    E: QueryExecutor + ?Sized
{
    mutation::apply(exec, insert_plan(exec.dialect(), form)?).await
}

/// Update a performer after confirmation.
pub async fn update<E, C>(exec: &E, form: &PerformerForm, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, update_plan(exec.dialect(), form)?, confirm).await
}

/// Delete a performer after confirmation.
pub async fn delete<E, C>(exec: &E, stage_name: &str, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, delete_plan(exec.dialect(), stage_name)?, confirm).await
}
