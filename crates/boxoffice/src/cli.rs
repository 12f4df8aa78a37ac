// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command-line arguments.

use std::path::PathBuf;

use boxoffice::{Action, Table};
use clap::{Parser, Subcommand, ValueEnum};

/// Ticket-sales database administration
#[derive(Parser, Debug)]
#[command(name = "boxoffice")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON connection settings; BOXOFFICE_DB_* variables are used when
    /// neither this file nor --sqlite is available
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use a local SQLite file instead of a server
    #[arg(long, global = true, conflicts_with = "config")]
    pub sqlite: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Aligned text tables
    Text,
    /// JSON documents
    Json
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the three dashboard rankings
    Dashboard,

    /// Insert a row: add <table> name=value...
    Add {
        /// Target table
        table:  Table,
        /// Field values as name=value
        fields: Vec<String>
    },

    /// Update a row: update <table> name=value...
    Update {
        /// Target table
        table:  Table,
        /// Key and new values as name=value
        fields: Vec<String>
    },

    /// Delete a row: delete <table> name=value...
    Delete {
        /// Target table
        table:  Table,
        /// Key values as name=value
        fields: Vec<String>
    },

    /// Search tickets
    Search {
        /// Lowest price
        #[arg(long, default_value = "")]
        min_price:   String,
        /// Highest price
        #[arg(long, default_value = "")]
        max_price:   String,
        /// Only tickets nobody has bought
        #[arg(long)]
        unpurchased: bool,
        /// Venue city; repeat for several
        #[arg(long = "city")]
        cities:      Vec<String>
    },

    /// List every row of a table
    SearchAll {
        /// Table to list
        table: Table
    },

    /// List cities that have tickets
    Cities,

    /// Show one ticket with its event details
    Ticket {
        /// Ticket id
        id:         String,
        /// Event name
        event_name: String
    },

    /// Show the form fields of a table for an action
    Fields {
        /// Table
        table:  Table,
        /// insert, update, delete or search
        action: Action
    },

    /// Create missing tables
    InitSchema
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_add_with_fields() {
        let cli = Cli::parse_from([
            "boxoffice",
            "--sqlite",
            "t.db",
            "add",
            "venue",
            "venue_name=Hall",
            "city=Austin"
        ]);
        match cli.command {
            Command::Add {
                table,
                fields
            } => {
                assert_eq!(table, Table::Venue);
                assert_eq!(fields.len(), 2);
            }
            other => panic!("unexpected {other:?}")
        }
    }

    #[test]
    fn parse_search_with_cities() {
        let cli = Cli::parse_from([
            "boxoffice",
            "search",
            "--min-price",
            "20",
            "--city",
            "Austin",
            "--city",
            "Boston",
            "--unpurchased",
            "--format",
            "json"
        ]);
        assert_eq!(cli.format, Format::Json);
        match cli.command {
            Command::Search {
                min_price,
                cities,
                unpurchased,
                ..
            } => {
                assert_eq!(min_price, "20");
                assert_eq!(cities, vec!["Austin", "Boston"]);
                assert!(unpurchased);
            }
            other => panic!("unexpected {other:?}")
        }
    }

    #[test]
    fn unknown_table_is_rejected() {
        assert!(Cli::try_parse_from(["boxoffice", "search-all", "Payroll"]).is_err());
    }
}
