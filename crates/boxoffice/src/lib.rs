// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # boxoffice
//!
//! Administrative backend for a ticket-sales database. Re-exports:
//! - All types from `boxoffice-core` ([`Executor`], [`TicketFilter`],
//!   [`Table`], [`Error`], …)
//! - [`Admin`] — table-driven insert / update / delete
//! - [`report`] — dashboard rankings and searches
//!
//! Every update and delete goes through Validate → Confirm → Mutate
//! ([`mutation`]); the caller supplies the confirmation as a closure and
//! gets a [`Result`] back. Nothing here prints or prompts.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use boxoffice::{Admin, ConfirmRequest, DatabaseConfig, Executor, Table, form::Record};
//!
//! let admin = Admin::new(Executor::new(DatabaseConfig::sqlite("tickets.db")));
//! admin.init_schema().await?;
//!
//! let venue = Record::new()
//!     .with("venue_name", "Hall")
//!     .with("city", "Austin")
//!     .with("capacity", "500");
//! admin.insert(Table::Venue, &venue).await?;
//!
//! let key = Record::new().with("venue_name", "Hall");
//! let outcome = admin
//!     .delete(Table::Venue, &key, &mut |req: &ConfirmRequest<'_>| {
//!         println!("{} {}", req.prompt, req.current);
//!         true
//!     })
//!     .await?;
//! ```

pub mod admin;
pub mod entity;
pub mod form;
pub mod mutation;
pub mod report;

pub use admin::Admin;
pub use boxoffice_core::*;
pub use mutation::{Applied, AutoConfirm, Confirm, ConfirmRequest, Outcome};
