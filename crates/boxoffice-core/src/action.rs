// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Operator actions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// What the operator wants to do with a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Add a row.
    Insert,
    /// Change non-key columns of a row.
    Update,
    /// Remove a row and its cascaded children.
    Delete,
    /// List rows.
    Search
}

impl Action {
    /// Check if this is a read-only action.
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::Search)
    }

    /// Check if this action changes data.
    pub const fn is_mutation(&self) -> bool {
        !self.is_read_only()
    }

    /// Check if the operator must accept before the write.
    pub const fn needs_confirmation(&self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }

    /// Lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Search => "search"
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insert" | "add" => Ok(Self::Insert),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "search" => Ok(Self::Search),
            other => Err(Error::validation(format!("Unknown action '{other}'")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_is_read_only() {
        assert!(Action::Search.is_read_only());
        assert!(!Action::Insert.is_read_only());
        assert!(!Action::Update.is_read_only());
        assert!(!Action::Delete.is_read_only());
    }

    #[test]
    fn action_is_mutation() {
        assert!(Action::Insert.is_mutation());
        assert!(Action::Delete.is_mutation());
        assert!(!Action::Search.is_mutation());
    }

    #[test]
    fn only_update_and_delete_confirm() {
        assert!(!Action::Insert.needs_confirmation());
        assert!(Action::Update.needs_confirmation());
        assert!(Action::Delete.needs_confirmation());
        assert!(!Action::Search.needs_confirmation());
    }

    #[test]
    fn parse_names() {
        assert_eq!("add".parse::<Action>().unwrap(), Action::Insert);
        assert_eq!("DELETE".parse::<Action>().unwrap(), Action::Delete);
        assert!("drop".parse::<Action>().is_err());
        assert_eq!(Action::Update.to_string(), "update");
    }
}
