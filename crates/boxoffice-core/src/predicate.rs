// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dynamic WHERE clause for ticket searches.
//!
//! A [`TicketFilter`] holds the optional search inputs; [`TicketFilter::build`]
//! turns them into a [`Predicate`]: clause text plus the values to bind,
//! in placeholder order. Values never reach the SQL text.
//!
//! # Generated SQL
//!
//! ```sql
//! price >= ? AND price <= ? AND purchased_by IS NULL
//!   AND event_name IN (
//!     SELECT e.event_name FROM `Events` e
//!     JOIN `Venue` v ON v.venue_name = e.venue_name
//!     WHERE v.city IN (?, ?)
//!   )
//! ```
//!
//! | Input | Clause |
//! |-------|--------|
//! | `min_price > 0` | `price >= ?` |
//! | `max_price` set | `price <= ?` |
//! | `unpurchased_only` | `purchased_by IS NULL` |
//! | one city | `... WHERE v.city = ?` |
//! | n cities | `... WHERE v.city IN (?, …)` |
//! | nothing | `1` |

use serde::{Deserialize, Serialize};

use crate::{
    dialect::Dialect,
    error::{Error, Result},
    schema::Table,
    validate,
    value::SqlValue
};

/// Always-true predicate used when no filter is set.
pub const ALWAYS_TRUE: &str = "1";

/// Optional ticket search inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketFilter {
    /// Lower price bound; zero means unbounded.
    #[serde(default)]
    pub min_price:        f64,
    /// Upper price bound.
    #[serde(default)]
    pub max_price:        Option<f64>,
    /// Only tickets nobody has bought.
    #[serde(default)]
    pub unpurchased_only: bool,
    /// Venue cities, in selection order.
    #[serde(default)]
    pub cities:           Vec<String>
}

/// WHERE clause text with its bound values.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Clause text using `?` placeholders.
    pub clause: String,
    /// Values for the placeholders, in order.
    pub params: Vec<SqlValue>
}

impl TicketFilter {
    /// Parse raw form input.
    ///
    /// Blank bounds are absent. A bound that is not a number, is negative,
    /// or a minimum above the maximum is a validation error. Blank city
    /// entries are dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use boxoffice_core::TicketFilter;
    ///
    /// let filter = TicketFilter::parse("20", "", true, vec!["Austin".into()]).unwrap();
    /// assert_eq!(filter.min_price, 20.0);
    /// assert_eq!(filter.max_price, None);
    /// assert!(TicketFilter::parse("x", "", false, vec![]).is_err());
    /// ```
    pub fn parse(min: &str, max: &str, unpurchased_only: bool, cities: Vec<String>) -> Result<Self> {
        let min_price = validate::price_bound(min, "Min price")?.unwrap_or(0.0);
        let max_price = validate::price_bound(max, "Max price")?;

        if let Some(max) = max_price
            && min_price > max
        {
            return Err(Error::validation(
                "Min price must not be greater than max price"
            ));
        }

        let cities = cities
            .into_iter()
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
            .collect();

        Ok(Self {
            min_price,
            max_price,
            unpurchased_only,
            cities
        })
    }

    /// Check if no filter is set.
    pub fn is_empty(&self) -> bool {
        self.min_price <= 0.0
            && self.max_price.is_none()
            && !self.unpurchased_only
            && self.cities.is_empty()
    }

    /// Build the WHERE clause over the `Tickets` table.
    pub fn build(&self, dialect: Dialect) -> Predicate {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<SqlValue> = Vec::new();
        let mut param_idx: usize = 1;

        if self.min_price > 0.0 {
            conditions.push(format!("price >= {}", dialect.placeholder(param_idx)));
            params.push(self.min_price.into());
            param_idx += 1;
        }

        if let Some(max) = self.max_price {
            conditions.push(format!("price <= {}", dialect.placeholder(param_idx)));
            params.push(max.into());
            param_idx += 1;
        }

        if self.unpurchased_only {
            conditions.push("purchased_by IS NULL".to_owned());
        }

        if !self.cities.is_empty() {
            let city_match = match self.cities.len() {
                1 => format!("= {}", dialect.placeholder(param_idx)),
                n => format!("IN ({})", dialect.placeholders(param_idx, n))
            };
            conditions.push(format!(
                "event_name IN (SELECT e.event_name FROM {} e JOIN {} v ON v.venue_name = e.venue_name WHERE v.city {})",
                Table::Events.ident(dialect),
                Table::Venue.ident(dialect),
                city_match
            ));
            params.extend(self.cities.iter().map(|c| SqlValue::from(c.as_str())));
        }

        let clause = if conditions.is_empty() {
            ALWAYS_TRUE.to_owned()
        } else {
            conditions.join(" AND ")
        };

        Predicate {
            clause,
            params
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(clause: &str) -> usize {
        clause.matches('?').count()
    }

    #[test]
    fn empty_filter_is_always_true() {
        let p = TicketFilter::default().build(Dialect::MySql);
        assert_eq!(p.clause, "1");
        assert!(p.params.is_empty());
        assert!(TicketFilter::default().is_empty());
    }

    #[test]
    fn zero_min_price_adds_nothing() {
        let filter = TicketFilter::parse("0", "", false, vec![]).unwrap();
        assert_eq!(filter.build(Dialect::MySql).clause, "1");
    }

    #[test]
    fn price_bounds_bind_in_order() {
        let filter = TicketFilter::parse("20", "45.5", false, vec![]).unwrap();
        let p = filter.build(Dialect::MySql);
        assert_eq!(p.clause, "price >= ? AND price <= ?");
        assert_eq!(p.params, vec![SqlValue::Real(20.0), SqlValue::Real(45.5)]);
    }

    #[test]
    fn unpurchased_has_no_parameter() {
        let filter = TicketFilter {
            unpurchased_only: true,
            ..Default::default()
        };
        let p = filter.build(Dialect::Sqlite);
        assert_eq!(p.clause, "purchased_by IS NULL");
        assert!(p.params.is_empty());
    }

    #[test]
    fn single_city_uses_equality() {
        let filter = TicketFilter::parse("", "", false, vec!["Austin".into()]).unwrap();
        let p = filter.build(Dialect::MySql);
        assert!(p.clause.ends_with("WHERE v.city = ?)"));
        assert_eq!(p.params, vec![SqlValue::from("Austin")]);
    }

    #[test]
    fn many_cities_one_placeholder_each_in_selection_order() {
        for n in 2..=6 {
            let cities: Vec<String> = (0..n).map(|i| format!("City{i}")).collect();
            let filter = TicketFilter {
                cities: cities.clone(),
                ..Default::default()
            };
            let p = filter.build(Dialect::MySql);
            assert_eq!(placeholders(&p.clause), n);
            assert!(p.clause.contains("v.city IN ("));
            let bound: Vec<SqlValue> = cities.iter().map(|c| SqlValue::from(c.as_str())).collect();
            assert_eq!(p.params, bound);
        }
    }

    #[test]
    fn all_filters_combined() {
        let filter = TicketFilter::parse(
            "10",
            "100",
            true,
            vec!["Austin".into(), "Boston".into()]
        )
        .unwrap();
        let p = filter.build(Dialect::MySql);
        assert_eq!(p.clause.matches(" AND ").count(), 3);
        assert_eq!(placeholders(&p.clause), p.params.len());
        assert_eq!(p.params.first(), Some(&SqlValue::Real(10.0)));
        assert_eq!(p.params.last(), Some(&SqlValue::from("Boston")));
    }

    #[test]
    fn values_never_reach_sql_text() {
        let filter = TicketFilter {
            cities: vec!["x'); DROP TABLE Tickets; --".into()],
            ..Default::default()
        };
        let p = filter.build(Dialect::MySql);
        assert!(!p.clause.contains("DROP"));
    }

    #[test]
    fn parse_rejects_bad_bounds() {
        assert!(TicketFilter::parse("abc", "", false, vec![]).unwrap_err().is_validation());
        assert!(TicketFilter::parse("", "-5", false, vec![]).is_err());
        assert!(TicketFilter::parse("50", "10", false, vec![]).is_err());
    }

    #[test]
    fn parse_drops_blank_cities() {
        let filter = TicketFilter::parse("", "", false, vec![" ".into(), "Austin ".into()]).unwrap();
        assert_eq!(filter.cities, vec!["Austin".to_owned()]);
    }
}
