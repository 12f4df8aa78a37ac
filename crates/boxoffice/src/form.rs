// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Configuration-driven forms.
//!
//! Picking a table and an action decides which fields the operator fills
//! in. [`TableForm::form`] returns that field list; a [`Record`] carries
//! the values back, keyed by column name.
//!
//! # Example
//!
//! ```rust
//! use boxoffice::{Action, Table, form::TableForm};
//!
//! let fields = Table::Tickets.form(Action::Delete);
//! let names: Vec<&str> = fields.iter().map(|f| f.name).collect();
//! assert_eq!(names, ["id", "event_name"]);
//! ```

use std::collections::BTreeMap;

use boxoffice_core::{Action, Error, Result, Table};
use serde::{Deserialize, Serialize};

/// One input field of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Column the value is written to.
    pub name:     &'static str,
    /// Operator-facing label.
    pub label:    &'static str,
    /// Whether a blank value is rejected.
    pub required: bool,
    /// Input format hint.
    pub hint:     Option<&'static str>
}

const fn field(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        required: true,
        hint: None
    }
}

const fn hinted(name: &'static str, label: &'static str, hint: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        required: true,
        hint: Some(hint)
    }
}

const DATE: &str = "YYYY-MM-DD";

const USER_ID: FieldSpec = field("id", "User ID");
const USER_NAME: FieldSpec = field("user_name", "Name");
const PHONE: FieldSpec = hinted("phone_number", "Phone Number", "digits only");
const DOB: FieldSpec = hinted("date_of_birth", "Date of Birth", DATE);

const VENUE_NAME: FieldSpec = field("venue_name", "Venue Name");
const CITY: FieldSpec = field("city", "City");
const CAPACITY: FieldSpec = hinted("capacity", "Capacity", "whole number");

const EVENT_NAME: FieldSpec = field("event_name", "Event Name");
const EVENT_DATE: FieldSpec = hinted("event_date", "Event Date", DATE);
const START_TIME: FieldSpec = hinted("start_time", "Start Time", "HH:MM:SS");

const TICKET_ID: FieldSpec = field("id", "Ticket ID");
const PURCHASED_BY: FieldSpec = FieldSpec {
    name:     "purchased_by",
    label:    "Purchased By",
    required: false,
    hint:     Some("user id, blank or N/A if unsold")
};
const PRICE: FieldSpec = hinted("price", "Price", "positive number");

const GROUP_NAME: FieldSpec = field("group_name", "Group Name");
const FOUNDED: FieldSpec = hinted("founded", "Founded", DATE);

const STAGE_NAME: FieldSpec = field("stage_name", "Stage Name");
const INDIVIDUAL_NAME: FieldSpec = field("individual_name", "Individual Name");
const AGE: FieldSpec = hinted("age", "Age", "0-120");

/// Form layout per table and action.
pub trait TableForm {
    /// Fields shown for `action`, in display order.
    ///
    /// Empty for [`Action::Search`] and for updates of join tables.
    fn form(&self, action: Action) -> Vec<FieldSpec>;
}

impl TableForm for Table {
    fn form(&self, action: Action) -> Vec<FieldSpec> {
        match (self, action) {
            (_, Action::Search) => vec![],
            (Self::Users, Action::Delete) => vec![USER_ID],
            (Self::Users, _) => vec![USER_ID, USER_NAME, PHONE, DOB],
            (Self::Venue, Action::Delete) => vec![VENUE_NAME],
            (Self::Venue, _) => vec![VENUE_NAME, CITY, CAPACITY],
            (Self::Events, Action::Delete) => vec![EVENT_NAME],
            (Self::Events, _) => vec![EVENT_NAME, VENUE_NAME, EVENT_DATE, START_TIME],
            (Self::Tickets, Action::Insert) => vec![EVENT_NAME, PURCHASED_BY, PRICE],
            (Self::Tickets, Action::Update) => vec![TICKET_ID, EVENT_NAME, PURCHASED_BY, PRICE],
            (Self::Tickets, Action::Delete) => vec![TICKET_ID, EVENT_NAME],
            (Self::Groups, Action::Delete) => vec![GROUP_NAME],
            (Self::Groups, _) => vec![GROUP_NAME, FOUNDED],
            (Self::IndividualPerformers, Action::Delete) => vec![STAGE_NAME],
            (Self::IndividualPerformers, _) => vec![STAGE_NAME, INDIVIDUAL_NAME, AGE],
            (Self::Memberships | Self::PerformanceList, Action::Update) => vec![],
            (Self::Memberships, _) => vec![STAGE_NAME, GROUP_NAME],
            (Self::PerformanceList, _) => vec![EVENT_NAME, GROUP_NAME]
        }
    }
}

/// Form values keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    /// Empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Field value, empty when absent.
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or_default()
    }

    /// Parse `name=value` pairs.
    ///
    /// Values may be empty or contain `=`; names are trimmed.
    pub fn parse<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        let mut record = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| Error::validation(format!("Expected name=value, got '{pair}'")))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::validation(format!("Missing field name in '{pair}'")));
            }
            record.0.insert(name.to_owned(), value.to_owned());
        }
        Ok(record)
    }

    /// Reject fields the form does not know.
    pub fn check_fields(&self, fields: &[FieldSpec]) -> Result<()> {
        match self
            .0
            .keys()
            .find(|k| !fields.iter().any(|f| f.name == k.as_str()))
        {
            Some(unknown) => {
                let known: Vec<&str> = fields.iter().map(|f| f.name).collect();
                Err(Error::validation(format!(
                    "Unknown field '{unknown}'. Expected: {}",
                    known.join(", ")
                )))
            }
            None => Ok(())
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect()
        )
    }
}
