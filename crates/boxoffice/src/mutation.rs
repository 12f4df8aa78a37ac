// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Validate → Confirm → Mutate.
//!
//! Every insert, update and delete is described by a [`MutationPlan`] and
//! executed by [`run`]. Building the plan performs the pure field checks;
//! [`run`] then walks the phases below and stops at the first failure.
//!
//! | Phase | Step | Failure |
//! |-------|------|---------|
//! | Validate | fetch the current row (update, delete) | [`Error::NotFound`] |
//! | Validate | run each [`Check`] | see [`Check`] |
//! | Confirm | hand the current row to a [`Confirm`] | [`Outcome::Declined`] |
//! | Mutate | run the statements in one transaction | [`Error::Database`] |
//!
//! Nothing is written unless every phase before Mutate passes.

use boxoffice_core::{Action, Error, QueryExecutor, Result, Row, Statement, Table};
use serde::Serialize;
use tracing::{debug, info};

/// A database check run before the mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// Query whose rows decide the check.
    pub probe:   Statement,
    /// Expected result.
    pub expect:  Expect,
    /// Operator-facing message on failure.
    pub message: String
}

/// Expected result of a [`Check`] probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// A referenced row must exist, else [`Error::NotFound`].
    Referenced,
    /// The key must be free, else [`Error::Validation`].
    Absent,
    /// No row may depend on the target, else
    /// [`Error::DependencyConflict`] listing the first column of each
    /// dependent row.
    NoDependents
}

impl Check {
    /// Foreign-key referent must exist.
    pub fn referenced(probe: Statement, message: impl Into<String>) -> Self {
        Self {
            probe,
            expect: Expect::Referenced,
            message: message.into()
        }
    }

    /// Primary key must not be taken.
    pub fn unique(probe: Statement, message: impl Into<String>) -> Self {
        Self {
            probe,
            expect: Expect::Absent,
            message: message.into()
        }
    }

    /// Nothing may reference the target.
    pub fn no_dependents(probe: Statement, message: impl Into<String>) -> Self {
        Self {
            probe,
            expect: Expect::NoDependents,
            message: message.into()
        }
    }

    async fn verify<E>(&self, exec: &E) -> Result<()>
    where
        E: QueryExecutor + ?Sized
    {
        let rows = exec.fetch_all(&self.probe).await?;
        debug!(expect = ?self.expect, rows = rows.len(), "check");

        match (self.expect, rows.is_empty()) {
            (Expect::Referenced, true) => Err(Error::not_found(&self.message)),
            (Expect::Absent, false) => Err(Error::validation(&self.message)),
            (Expect::NoDependents, false) => {
                let mut blocking: Vec<String> = rows
                    .iter()
                    .map(|r| r.display(0).to_owned())
                    .collect();
                blocking.dedup();
                Err(Error::conflict(
                    format!("{} {}", self.message, blocking.join(", ")),
                    blocking
                ))
            }
            _ => Ok(())
        }
    }
}

/// The row an update or delete acts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Query returning the current row.
    pub probe:     Statement,
    /// Column headers of the probe.
    pub headers:   Vec<&'static str>,
    /// Message when the row is missing.
    pub not_found: String
}

/// Everything needed to run one mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationPlan {
    /// Kind of mutation.
    pub action:       Action,
    /// Table being changed.
    pub table:        Table,
    /// Row acted on; `None` for inserts.
    pub target:       Option<Target>,
    /// Checks run after the target is found.
    pub checks:       Vec<Check>,
    /// Confirmation question.
    pub prompt:       String,
    /// Writes, committed together.
    pub statements:   Vec<Statement>,
    /// Message reported after commit.
    pub success:      String,
    /// Id assigned by the insert, if any.
    pub generated_id: Option<i64>
}

impl MutationPlan {
    /// Plan an insert; inserts are never confirmed.
    pub fn insert(table: Table, statement: Statement) -> Self {
        Self {
            action:       Action::Insert,
            table,
            target:       None,
            checks:       Vec::new(),
            prompt:       String::new(),
            statements:   vec![statement],
            success:      "Inserted successfully".to_owned(),
            generated_id: None
        }
    }

    /// Plan an update of `target`.
    pub fn update(table: Table, target: Target, statement: Statement) -> Self {
        Self {
            action:       Action::Update,
            table,
            target:       Some(target),
            checks:       Vec::new(),
            prompt:       format!("Are you sure you want to update this row in {table}?"),
            statements:   vec![statement],
            success:      format!("{} updated successfully.", table_noun(table)),
            generated_id: None
        }
    }

    /// Plan a delete of `target` through `statements`, children first.
    pub fn delete(table: Table, target: Target, statements: Vec<Statement>) -> Self {
        Self {
            action: Action::Delete,
            table,
            target: Some(target),
            checks: Vec::new(),
            prompt: format!("Are you sure you want to delete this row from {table}?"),
            statements,
            success: format!("{} deleted successfully.", table_noun(table)),
            generated_id: None
        }
    }

    /// Add a check.
    #[must_use]
    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Replace the confirmation question.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Replace the success message.
    #[must_use]
    pub fn success(mut self, message: impl Into<String>) -> Self {
        self.success = message.into();
        self
    }
}

fn table_noun(table: Table) -> &'static str {
    match table {
        Table::Users => "User",
        Table::Venue => "Venue",
        Table::Events => "Event",
        Table::Tickets => "Ticket",
        Table::Groups => "Group",
        Table::IndividualPerformers => "Individual performer",
        Table::Memberships => "Membership",
        Table::PerformanceList => "Performance"
    }
}

/// What the operator is asked to accept.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmRequest<'a> {
    /// Kind of mutation.
    pub action:  Action,
    /// Table being changed.
    pub table:   Table,
    /// Question to show.
    pub prompt:  &'a str,
    /// Column headers of [`current`](Self::current).
    pub headers: &'a [&'static str],
    /// The row as it is now.
    pub current: &'a Row
}

/// Operator confirmation.
///
/// Any `FnMut(&ConfirmRequest) -> bool` closure is a [`Confirm`].
pub trait Confirm {
    /// Return `true` to proceed with the mutation.
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&ConfirmRequest<'_>) -> bool
{
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> bool {
        self(request)
    }
}

/// Accepts every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _request: &ConfirmRequest<'_>) -> bool {
        true
    }
}

/// A committed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Applied {
    /// Operator-facing success message.
    pub message:      String,
    /// Rows affected across all statements.
    pub affected:     u64,
    /// Id assigned by the insert, if any.
    pub generated_id: Option<i64>
}

/// Result of a mutation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Outcome {
    /// Committed.
    Applied(Applied),
    /// The operator declined; nothing changed.
    Declined
}

impl Outcome {
    /// Check if the mutation was committed.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Check if the operator declined.
    pub const fn is_declined(&self) -> bool {
        matches!(self, Self::Declined)
    }

    /// The committed mutation, if any.
    pub fn applied(self) -> Option<Applied> {
        match self {
            Self::Applied(a) => Some(a),
            Self::Declined => None
        }
    }
}

/// Run every check in order, stopping at the first failure.
pub async fn verify<E>(exec: &E, checks: &[Check]) -> Result<()>
where
    E: QueryExecutor + ?Sized
{
    for check in checks {
        check.verify(exec).await?;
    }
    Ok(())
}

/// Run a plan through Validate → Confirm → Mutate.
pub async fn run<E, C>(exec: &E, plan: MutationPlan, confirm: &mut C) -> Result<Outcome>
where
    E: QueryExecutor + ?Sized,
    C: Confirm + ?Sized
{
    let current = match &plan.target {
        Some(target) => Some(
            exec.fetch_optional(&target.probe)
                .await?
                .ok_or_else(|| Error::not_found(&target.not_found))?
        ),
        None => None
    };

    verify(exec, &plan.checks).await?;

    if let (Some(target), Some(row)) = (&plan.target, &current)
        && plan.action.needs_confirmation()
    {
        let request = ConfirmRequest {
            action:  plan.action,
            table:   plan.table,
            prompt:  &plan.prompt,
            headers: &target.headers,
            current: row
        };
        if !confirm.confirm(&request) {
            info!(action = %plan.action, table = %plan.table, "declined");
            return Ok(Outcome::Declined);
        }
    }

    let affected = match plan.statements.as_slice() {
        [single] => exec.execute(single).await?,
        many => exec.execute_all(many).await?
    };
    info!(
        action = %plan.action,
        table = %plan.table,
        affected,
        "committed"
    );

    Ok(Outcome::Applied(Applied {
        message: plan.success,
        affected,
        generated_id: plan.generated_id
    }))
}

/// Run a plan that needs no confirmation, such as an insert.
pub async fn apply<E>(exec: &E, plan: MutationPlan) -> Result<Applied>
where
    E: QueryExecutor + ?Sized
{
    let table = plan.table;
    run(exec, plan, &mut AutoConfirm)
        .await?
        .applied()
        .ok_or_else(|| Error::validation(format!("Change to {table} was not applied")))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use boxoffice_core::{Dialect, async_trait};

    use super::*;

    #[derive(Default)]
    struct Scripted {
        reads:  Mutex<Vec<Vec<Row>>>,
        writes: Mutex<Vec<Statement>>
    }

    impl Scripted {
        fn with_reads(reads: Vec<Vec<Row>>) -> Self {
            let mut reads = reads;
            reads.reverse();
            Self {
                reads:  Mutex::new(reads),
                writes: Mutex::new(Vec::new())
            }
        }

        fn writes(&self) -> usize {
            self.writes.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl QueryExecutor for Scripted {
        fn dialect(&self) -> Dialect {
            Dialect::Sqlite
        }

        async fn fetch_all(&self, _stmt: &Statement) -> Result<Vec<Row>> {
            Ok(self.reads.lock().unwrap().pop().unwrap_or_default())
        }

        async fn execute(&self, stmt: &Statement) -> Result<u64> {
            self.writes.lock().unwrap().push(stmt.clone());
            Ok(1)
        }

        async fn execute_all(&self, stmts: &[Statement]) -> Result<u64> {
            self.writes.lock().unwrap().extend_from_slice(stmts);
            Ok(stmts.len() as u64)
        }
    }

    fn row(cells: &[&str]) -> Row {
        Row(cells.iter().map(|c| Some(c.to_string())).collect())
    }

    fn target() -> Target {
        Target {
            probe:     Statement::new("current"),
            headers:   vec!["group_name", "founded"],
            not_found: "Group with name X not found.".into()
        }
    }

    fn group_delete() -> MutationPlan {
        MutationPlan::delete(
            Table::Groups,
            target(),
            vec![Statement::new("d1"), Statement::new("d2")]
        )
        .check(Check::no_dependents(
            Statement::new("deps"),
            "Delete these events first:"
        ))
    }

    #[tokio::test]
    async fn insert_skips_confirmation() {
        let exec = Scripted::default();
        let plan = MutationPlan::insert(Table::Venue, Statement::new("ins"));
        let mut asked = false;
        let outcome = run(&exec, plan, &mut |_: &ConfirmRequest<'_>| {
            asked = true;
            false
        })
        .await
        .unwrap();
        assert!(outcome.is_applied());
        assert!(!asked);
        assert_eq!(exec.writes(), 1);
    }

    #[tokio::test]
    async fn missing_target_is_not_found() {
        let exec = Scripted::with_reads(vec![vec![]]);
        let err = run(&exec, group_delete(), &mut AutoConfirm)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(exec.writes(), 0);
    }

    #[tokio::test]
    async fn dependents_block_and_are_listed() {
        let exec = Scripted::with_reads(vec![
            vec![row(&["X", "2000-01-01"])],
            vec![row(&["Gala"]), row(&["Gala"]), row(&["Fest"])],
        ]);
        let err = run(&exec, group_delete(), &mut AutoConfirm)
            .await
            .unwrap_err();
        match err {
            Error::DependencyConflict {
                blocking, ..
            } => assert_eq!(blocking, vec!["Gala".to_owned(), "Fest".to_owned()]),
            other => panic!("unexpected {other:?}")
        }
        assert_eq!(exec.writes(), 0);
    }

    #[tokio::test]
    async fn declined_writes_nothing() {
        let exec = Scripted::with_reads(vec![vec![row(&["X", "2000-01-01"])], vec![]]);
        let mut seen = None;
        let outcome = run(&exec, group_delete(), &mut |req: &ConfirmRequest<'_>| {
            seen = Some(req.current.clone());
            false
        })
        .await
        .unwrap();
        assert!(outcome.is_declined());
        assert_eq!(seen, Some(row(&["X", "2000-01-01"])));
        assert_eq!(exec.writes(), 0);
    }

    #[tokio::test]
    async fn accepted_runs_batch() {
        let exec = Scripted::with_reads(vec![vec![row(&["X", "2000-01-01"])], vec![]]);
        let applied = run(&exec, group_delete(), &mut AutoConfirm)
            .await
            .unwrap()
            .applied()
            .unwrap();
        assert_eq!(applied.affected, 2);
        assert_eq!(applied.message, "Group deleted successfully.");
        assert_eq!(exec.writes(), 2);
    }

    #[tokio::test]
    async fn duplicate_key_is_validation() {
        let exec = Scripted::with_reads(vec![vec![row(&["1"])]]);
        let plan = MutationPlan::insert(Table::Users, Statement::new("ins")).check(Check::unique(
            Statement::new("probe"),
            "ID 1 already exists. Please select a new ID."
        ));
        let err = run(&exec, plan, &mut AutoConfirm).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(exec.writes(), 0);
    }

    #[tokio::test]
    async fn missing_referent_is_not_found() {
        let exec = Scripted::with_reads(vec![vec![]]);
        let plan = MutationPlan::insert(Table::Events, Statement::new("ins"))
            .check(Check::referenced(Statement::new("venue"), "no venue"));
        let err = run(&exec, plan, &mut AutoConfirm).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no venue");
        assert_eq!(exec.writes(), 0);
    }
}
