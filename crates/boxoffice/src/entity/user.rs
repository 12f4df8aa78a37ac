// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Ticket buyers (`Users`).

use boxoffice_core::{Dialect, QueryExecutor, Result, SqlValue, Table, validate};
use serde::{Deserialize, Serialize};

use super::{dependents, exists, insert as insert_sql, target, text, update as update_sql};
use crate::{
    form::Record,
    mutation::{self, Applied, Check, Confirm, MutationPlan, Outcome}
};

/// User form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    /// Integer id.
    pub id:            String,
    /// Display name.
    pub user_name:     String,
    /// Digits only.
    pub phone_number:  String,
    /// `YYYY-MM-DD`.
    pub date_of_birth: String
}

impl From<&Record> for UserForm {
    fn from(r: &Record) -> Self {
        Self {
            id:            r.get("id").to_owned(),
            user_name:     r.get("user_name").to_owned(),
            phone_number:  r.get("phone_number").to_owned(),
            date_of_birth: r.get("date_of_birth").to_owned()
        }
    }
}

struct Valid {
    id:    i64,
    name:  SqlValue,
    phone: String,
    dob:   String
}

fn check(form: &UserForm) -> Result<Valid> {
    validate::require(&[
        &form.id,
        &form.user_name,
        &form.phone_number,
        &form.date_of_birth
    ])?;
    Ok(Valid {
        id:    validate::integer(&form.id, "User ID")?,
        name:  text(&form.user_name),
        phone: validate::phone(&form.phone_number)?,
        dob:   validate::date(&form.date_of_birth)?
    })
}

/// Plan inserting a user.
pub fn insert_plan(dialect: Dialect, form: &UserForm) -> Result<MutationPlan> {
    let v = check(form)?;
    let stmt = insert_sql(
        dialect,
        Table::Users,
        vec![v.id.into(), v.name, v.phone.into(), v.dob.into()]
    );

    Ok(MutationPlan::insert(Table::Users, stmt).check(Check::unique(
        exists(dialect, Table::Users, &["id"], vec![v.id.into()]),
        format!("ID {} already exists. Please select a new ID.", v.id)
    )))
}

/// Plan updating name, phone and date of birth of a user.
pub fn update_plan(dialect: Dialect, form: &UserForm) -> Result<MutationPlan> {
    let v = check(form)?;
    let stmt = update_sql(
        dialect,
        Table::Users,
        &["user_name", "phone_number", "date_of_birth"],
        vec![v.name, v.phone.into(), v.dob.into(), v.id.into()]
    );

    Ok(MutationPlan::update(
        Table::Users,
        target(
            dialect,
            Table::Users,
            vec![v.id.into()],
            format!("User with ID {} not found.", v.id)
        ),
        stmt
    ))
}

/// Plan deleting a user; refused while the user holds tickets.
pub fn delete_plan(dialect: Dialect, id: &str) -> Result<MutationPlan> {
    validate::require(&[id])?;
    let id = validate::integer(id, "User ID")?;

    let delete = super::delete(dialect, Table::Users, &["id"], vec![id.into()]);
    Ok(MutationPlan::delete(
        Table::Users,
        target(
            dialect,
            Table::Users,
            vec![id.into()],
            format!("User with ID {id} not found.")
        ),
        vec![delete]
    )
    .check(Check::no_dependents(
        dependents(
            dialect,
            Table::Tickets,
            "event_name",
            &["purchased_by"],
            vec![id.into()]
        ),
        format!(
            "Cannot delete user with ID {id} because they have entries in the 'Tickets' table. \
             Delete their tickets for these events first:"
        )
    ))
    .prompt(format!("Are you sure you want to delete user with ID {id}?")))
}

/// Insert a user.
pub async fn insert<E>(exec: &E, form: &UserForm) -> Result<Applied>
where
    E: QueryExecutor + ?Sized
{
    mutation::apply(exec, insert_plan(exec.dialect(), form)?).await
}

/// Update a user after confirmation.
pub async fn update<E, C>(exec: &E, form: &UserForm, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, update_plan(exec.dialect(), form)?, confirm).await
}

/// Delete a user after confirmation.
pub async fn delete<E, C>(exec: &E, id: &str, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    mutation::run(exec, delete_plan(exec.dialect(), id)?, confirm).await
}
