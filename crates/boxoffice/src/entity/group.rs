// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Performing groups.
//!
//! A group booked for an event cannot be deleted; the blocking events are
//! reported. Otherwise its memberships are removed along with it.

use boxoffice_core::{Dialect, QueryExecutor, Result, Table, validate};
use serde::{Deserialize, Serialize};

use super::{dependents, exists, insert as insert_sql, target, text, update as update_sql};
use crate::{
    form::Record,
    mutation::{self, Applied, Check, Confirm, MutationPlan, Outcome}
};

/// Group form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupForm {
    /// Unique group name.
    pub group_name: String,
    /// `YYYY-MM-DD`.
    pub founded:    String
}

impl From<&Record> for GroupForm {
    fn from(r: &Record) -> Self {
        Self {
            group_name: r.get("group_name").to_owned(),
            founded:    r.get("founded").to_owned()
        }
    }
}

/// Plan inserting a group.
pub fn insert_plan(dialect: Dialect, form: &GroupForm) -> Result<MutationPlan> {
    validate::require(&[&form.group_name, &form.founded])?;
    let name = text(&form.group_name);
    let founded = validate::date(&form.founded)?;

    Ok(MutationPlan::insert(
        Table::Groups,
        insert_sql(dialect, Table::Groups, vec![name.clone(), founded.into()])
    )
    .check(Check::unique(
        exists(dialect, Table::Groups, &["group_name"], vec![name]),
        format!(
            "Group name {} already exists. Please select a new name.",
            form.group_name.trim()
        )
    )))
}

/// Plan changing the founding date of a group.
pub fn update_plan(dialect: Dialect, form: &GroupForm) -> Result<MutationPlan> {
    validate::require(&[&form.group_name, &form.founded])?;
    let name = text(&form.group_name);
    let founded = validate::date(&form.founded)?;

    Ok(MutationPlan::update(
        Table::Groups,
        target(
            dialect,
            Table::Groups,
            vec![name.clone()],
            format!("Group with name {} not found.", form.group_name.trim())
        ),
        update_sql(dialect, Table::Groups, &["founded"], vec![founded.into(), name])
    ))
}

/// Plan deleting a group and its memberships.
pub fn delete_plan(dialect: Dialect, group_name: &str) -> Result<MutationPlan> {
    validate::require(&[group_name])?;
    let name = text(group_name);
    let group_name = group_name.trim();

    let cascade = vec![
        super::delete(
            dialect,
            Table::Memberships,
            &["group_name"],
            vec![name.clone()]
        ),
        super::delete(dialect, Table::Groups, &["group_name"], vec![name.clone()]),
    ];

    Ok(MutationPlan::delete(
        Table::Groups,
        target(
            dialect,
            Table::Groups,
            vec![name.clone()],
            format!("Group with name {group_name} not found.")
        ),
        cascade
    )
    .check(Check::no_dependents(
        dependents(
            dialect,
            Table::PerformanceList,
            "event_name",
            &["group_name"],
            vec![name]
        ),
        format!(
            "Cannot delete group with name {group_name} because it has entries in the \
             'PerformanceList' table. You must delete the following associated events first:"
        )
    ))
    .prompt(format!(
        "Are you sure you want to delete group {group_name}? Its memberships will be deleted too."
    )))
}

/// Insert a group.
pub async fn insert<E>(exec: &E, form: &GroupForm) -> Result<Applied>
where
    E: QueryExecutor + ?Sized
{
    mutation::apply(exec, insert_plan(exec.dialect(), form)?).await
}

/// Update a group after confirmation.
pub async fn update<E, C>(exec: &E, form: &GroupForm, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, update_plan(exec.dialect(), form)?, confirm).await
}

/// Delete a group after confirmation.
pub async fn delete<E, C>(exec: &E, group_name: &str, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, delete_plan(exec.dialect(), group_name)?, confirm).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn founded_must_be_valid_date() {
        let form = GroupForm {
            group_name: "Band".into(),
            founded:    "1999-02-30".into()
        };
        assert!(insert_plan(Dialect::MySql, &form).is_ok());

        let form = GroupForm {
            group_name: "Band".into(),
            founded:    "30-02-1999".into()
        };
        assert!(insert_plan(Dialect::MySql, &form).unwrap_err().is_validation());
    }

    #[test]
    fn delete_removes_memberships_then_group() {
        let plan = delete_plan(Dialect::MySql, "Band").unwrap();
        assert!(plan.statements[0].sql.starts_with("DELETE FROM `Memberships`"));
        assert!(plan.statements[1].sql.starts_with("DELETE FROM `Groups`"));
        assert!(plan.checks[0].probe.sql.contains("`PerformanceList`"));
    }
}
