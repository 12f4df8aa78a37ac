// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Read-only reports and searches.
//!
//! Dashboard rankings use `RANK() OVER (ORDER BY … DESC)` and keep every
//! row whose rank is within the cutoff, so ties at the last place are all
//! listed. They never use `LIMIT`.
//!
//! | Query | Cutoff | Columns |
//! |-------|--------|---------|
//! | [`top_ticket_holders`] | rank ≤ 10 | user id, name, tickets |
//! | [`top_revenue_events`] | rank ≤ 5 | event, revenue |
//! | [`top_spenders`] | rank ≤ 10 | user id, name, tickets, total |
//!
//! Every projection renders cells as text.

use boxoffice_core::{Dialect, Error, QueryExecutor, Result, Row, Statement, Table, TicketFilter, validate};
use serde::Serialize;
use tracing::debug;

/// A titled result grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Heading shown above the grid.
    pub title:   String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Rows in query order.
    pub rows:    Vec<Row>
}

impl Report {
    fn new(title: impl Into<String>, headers: &[&str], rows: Vec<Row>) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| (*h).to_owned()).collect(),
            rows
        }
    }
}

/// Users ranked by number of purchased tickets, top 10 with ties.
pub fn top_ticket_holders_statement(dialect: Dialect) -> Statement {
    Statement::new(format!(
        "SELECT user_id, user_name, ticket_count FROM (\
         SELECT {} AS user_id, u.user_name AS user_name, {} AS ticket_count, u.id AS uid, \
         RANK() OVER (ORDER BY COUNT(t.id) DESC) AS rnk \
         FROM {} t JOIN {} u ON u.id = t.purchased_by \
         WHERE t.purchased_by IS NOT NULL \
         GROUP BY u.id, u.user_name\
         ) ranked WHERE rnk <= 10 ORDER BY rnk, uid",
        dialect.text("u.id"),
        dialect.text("COUNT(t.id)"),
        Table::Tickets.ident(dialect),
        Table::Users.ident(dialect)
    ))
}

/// Events ranked by revenue from purchased tickets, top 5 with ties.
pub fn top_revenue_events_statement(dialect: Dialect) -> Statement {
    Statement::new(format!(
        "SELECT event_name, total_revenue FROM (\
         SELECT e.event_name AS event_name, {} AS total_revenue, \
         RANK() OVER (ORDER BY SUM(t.price) DESC) AS rnk \
         FROM {} t JOIN {} e ON e.event_name = t.event_name \
         WHERE t.purchased_by IS NOT NULL \
         GROUP BY e.event_name\
         ) ranked WHERE rnk <= 5 ORDER BY rnk, event_name",
        dialect.text("SUM(t.price)"),
        Table::Tickets.ident(dialect),
        Table::Events.ident(dialect)
    ))
}

/// Users ranked by total spending, top 10 with ties.
pub fn top_spenders_statement(dialect: Dialect) -> Statement {
    Statement::new(format!(
        "SELECT user_id, user_name, ticket_count, total_spent FROM (\
         SELECT {} AS user_id, u.user_name AS user_name, {} AS ticket_count, \
         {} AS total_spent, u.id AS uid, \
         RANK() OVER (ORDER BY SUM(t.price) DESC) AS rnk \
         FROM {} t JOIN {} u ON u.id = t.purchased_by \
         WHERE t.purchased_by IS NOT NULL \
         GROUP BY u.id, u.user_name\
         ) ranked WHERE rnk <= 10 ORDER BY rnk, uid",
        dialect.text("u.id"),
        dialect.text("COUNT(t.id)"),
        dialect.text("SUM(t.price)"),
        Table::Tickets.ident(dialect),
        Table::Users.ident(dialect)
    ))
}

/// Top 10 users with the most tickets.
pub async fn top_ticket_holders<E>(exec: &E) -> Result<Report>
where
    E: QueryExecutor + ?Sized
{
    let rows = exec
        .fetch_all(&top_ticket_holders_statement(exec.dialect()))
        .await?;
    Ok(Report::new(
        "Top 10 Users With Most Tickets",
        &["ID", "User Name", "Ticket Count"],
        rows
    ))
}

/// Top 5 events with the highest revenue.
pub async fn top_revenue_events<E>(exec: &E) -> Result<Report>
where
    E: QueryExecutor + ?Sized
{
    let rows = exec
        .fetch_all(&top_revenue_events_statement(exec.dialect()))
        .await?;
    Ok(Report::new(
        "Top 5 Events with Highest Revenue",
        &["Event Name", "Total Revenue"],
        rows
    ))
}

/// Top 10 users with the highest spending.
pub async fn top_spenders<E>(exec: &E) -> Result<Report>
where
    E: QueryExecutor + ?Sized
{
    let rows = exec
        .fetch_all(&top_spenders_statement(exec.dialect()))
        .await?;
    Ok(Report::new(
        "Top 10 Users with Highest Spending",
        &["User ID", "User Name", "Ticket Count", "Total Spent"],
        rows
    ))
}

/// All three dashboard rankings.
pub async fn dashboard<E>(exec: &E) -> Result<Vec<Report>>
where
    E: QueryExecutor + ?Sized
{
    Ok(vec![
        top_ticket_holders(exec).await?,
        top_revenue_events(exec).await?,
        top_spenders(exec).await?,
    ])
}

/// Distinct cities with at least one ticket, sorted.
pub async fn ticket_cities<E>(exec: &E) -> Result<Vec<String>>
where
    E: QueryExecutor + ?Sized
{
    let dialect = exec.dialect();
    let stmt = Statement::new(format!(
        "SELECT DISTINCT v.city FROM {} v \
         JOIN {} e ON e.venue_name = v.venue_name \
         JOIN {} t ON t.event_name = e.event_name \
         ORDER BY v.city",
        Table::Venue.ident(dialect),
        Table::Events.ident(dialect),
        Table::Tickets.ident(dialect)
    ));
    let rows = exec.fetch_all(&stmt).await?;
    Ok(rows
        .into_iter()
        .filter_map(|r| r.get(0).map(str::to_owned))
        .collect())
}

/// Ticket search statement for `filter`.
pub fn search_tickets_statement(dialect: Dialect, filter: &TicketFilter) -> Statement {
    let predicate = filter.build(dialect);
    Statement::new(format!(
        "SELECT {} FROM {} WHERE {} ORDER BY event_name, id",
        Table::Tickets.text_projection(dialect),
        Table::Tickets.ident(dialect),
        predicate.clause
    ))
    .bind_all(predicate.params)
}

/// Tickets matching `filter`, by event then id.
pub async fn search_tickets<E>(exec: &E, filter: &TicketFilter) -> Result<Report>
where
    E: QueryExecutor + ?Sized
{
    let stmt = search_tickets_statement(exec.dialect(), filter);
    debug!(clause = %stmt.sql, params = stmt.params.len(), "ticket search");
    let rows = exec.fetch_all(&stmt).await?;
    Ok(Report::new(
        "Tickets",
        &["ID", "Event Name", "Purchased By", "Price"],
        rows
    ))
}

/// One ticket with its event's venue, date and start time.
pub async fn ticket_details<E>(exec: &E, id: &str, event_name: &str) -> Result<Report>
where
    E: QueryExecutor + ?Sized
{
    validate::require(&[id, event_name])?;
    let id = validate::integer(id, "Ticket ID")?;
    let event_name = event_name.trim();
    let dialect = exec.dialect();

    let stmt = Statement::new(format!(
        "SELECT {}, t.event_name, {}, {}, e.venue_name, {}, {} \
         FROM {} t JOIN {} e ON e.event_name = t.event_name \
         WHERE t.id = {} AND t.event_name = {}",
        dialect.text("t.id"),
        dialect.text("t.purchased_by"),
        dialect.text("t.price"),
        dialect.text("e.event_date"),
        dialect.text("e.start_time"),
        Table::Tickets.ident(dialect),
        Table::Events.ident(dialect),
        dialect.placeholder(1),
        dialect.placeholder(2)
    ))
    .bind(id)
    .bind(event_name);

    let row = exec.fetch_optional(&stmt).await?.ok_or_else(|| {
        Error::not_found(format!(
            "Ticket with ID {id} and event name {event_name} not found."
        ))
    })?;
    Ok(Report::new(
        "Ticket Information",
        &[
            "ID",
            "Event Name",
            "Purchased By",
            "Price",
            "Venue",
            "Date",
            "Start Time"
        ],
        vec![row]
    ))
}

/// Every row of `table`, ordered by primary key.
pub async fn search_all<E>(exec: &E, table: Table) -> Result<Report>
where
    E: QueryExecutor + ?Sized
{
    let dialect = exec.dialect();
    let stmt = Statement::new(format!(
        "SELECT {} FROM {} ORDER BY {}",
        table.text_projection(dialect),
        table.ident(dialect),
        table.primary_key().join(", ")
    ));
    let rows = exec.fetch_all(&stmt).await?;
    Ok(Report::new(table.name(), &table.column_names(), rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rankings_are_tie_aware() {
        for stmt in [
            top_ticket_holders_statement(Dialect::MySql),
            top_revenue_events_statement(Dialect::MySql),
            top_spenders_statement(Dialect::MySql)
        ] {
            assert!(stmt.sql.contains("RANK() OVER (ORDER BY"));
            assert!(!stmt.sql.to_uppercase().contains("LIMIT"));
            assert!(stmt.params.is_empty());
        }
    }

    #[test]
    fn cutoffs() {
        assert!(top_ticket_holders_statement(Dialect::Sqlite).sql.contains("rnk <= 10"));
        assert!(top_revenue_events_statement(Dialect::Sqlite).sql.contains("rnk <= 5"));
        assert!(top_spenders_statement(Dialect::Sqlite).sql.contains("rnk <= 10"));
    }

    #[test]
    fn search_binds_filter_values() {
        let filter = TicketFilter::parse("20", "", true, vec!["Austin".into()]).unwrap();
        let stmt = search_tickets_statement(Dialect::MySql, &filter);
        assert!(stmt.sql.starts_with("SELECT CAST(id AS CHAR), event_name"));
        assert!(stmt.sql.contains("purchased_by IS NULL"));
        assert_eq!(stmt.params.len(), 2);
    }

    #[test]
    fn empty_search_is_always_true() {
        let stmt = search_tickets_statement(Dialect::MySql, &TicketFilter::default());
        assert!(stmt.sql.contains("WHERE 1 ORDER BY"));
    }
}
