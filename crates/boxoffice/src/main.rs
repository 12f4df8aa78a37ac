// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `boxoffice` command-line front end.
//!
//! Parses arguments, loads connection settings, calls the backend and
//! prints what comes back. Updates and deletes ask `y/N` on stdin unless
//! `--yes` is given.

mod cli;
mod render;

use std::{
    io::{self, BufRead, Write},
    path::Path,
    process::ExitCode
};

use anyhow::Context;
use boxoffice::{
    Admin, AutoConfirm, Confirm, ConfirmRequest, DEFAULT_CONFIG_FILE, DatabaseConfig, Executor,
    TicketFilter,
    form::{Record, TableForm},
    report
};
use clap::Parser;
use cli::{Cli, Command};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boxoffice=info"))
        )
        .with_writer(io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<boxoffice::Error>() {
                Some(e) => eprintln!("{}: {e}", e.title()),
                None => eprintln!("Error: {err:#}")
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<DatabaseConfig> {
    if let Some(path) = &cli.sqlite {
        return Ok(DatabaseConfig::sqlite(path));
    }
    if let Some(path) = &cli.config {
        return Ok(DatabaseConfig::load(path)?);
    }
    if Path::new(DEFAULT_CONFIG_FILE).exists() {
        return Ok(DatabaseConfig::load(DEFAULT_CONFIG_FILE)?);
    }
    DatabaseConfig::from_env().context("no --sqlite, --config or boxoffice.json given")
}

/// Asks the operator: the question goes to `output`, the answer is read
/// from `input`. I/O failures are logged and count as a refusal.
struct PromptConfirm<R, W> {
    input:  R,
    output: W
}

impl PromptConfirm<io::StdinLock<'static>, io::Stderr> {
    fn stdio() -> Self {
        Self {
            input:  io::stdin().lock(),
            output: io::stderr()
        }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> bool {
        let current = request
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("  {h}: {}", request.current.display(i)))
            .collect::<Vec<_>>()
            .join("\n");
        if let Err(e) = write!(
            self.output,
            "{}\n{current}\n{} [y/N] ",
            request.table, request.prompt
        )
        .and_then(|()| self.output.flush())
        {
            warn!(error = %e, "could not show confirmation prompt, declining");
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!(error = %e, "could not read confirmation, declining");
                false
            }
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;

    if let Command::Fields {
        table,
        action
    } = &cli.command
    {
        println!("{}", render::fields(&table.form(*action), format)?);
        return Ok(());
    }

    let config = load_config(&cli)?;
    debug!(?config, "connection settings");
    let admin = Admin::new(Executor::new(config));
    let exec = admin.executor();

    let mut confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(PromptConfirm::stdio())
    };

    let out = match cli.command {
        Command::Dashboard => render::reports(&report::dashboard(exec).await?, format)?,
        Command::Add {
            table,
            fields
        } => {
            let record = Record::parse(&fields)?;
            render::applied(&admin.insert(table, &record).await?, format)?
        }
        Command::Update {
            table,
            fields
        } => {
            let record = Record::parse(&fields)?;
            let outcome = admin.update(table, &record, confirm.as_mut()).await?;
            render::outcome(&outcome, format)?
        }
        Command::Delete {
            table,
            fields
        } => {
            let record = Record::parse(&fields)?;
            let outcome = admin.delete(table, &record, confirm.as_mut()).await?;
            render::outcome(&outcome, format)?
        }
        Command::Search {
            min_price,
            max_price,
            unpurchased,
            cities
        } => {
            let filter = TicketFilter::parse(&min_price, &max_price, unpurchased, cities)?;
            render::reports(&[report::search_tickets(exec, &filter).await?], format)?
        }
        Command::SearchAll {
            table
        } => render::reports(&[report::search_all(exec, table).await?], format)?,
        Command::Cities => render::list(&report::ticket_cities(exec).await?, format)?,
        Command::Ticket {
            id,
            event_name
        } => render::reports(
            &[report::ticket_details(exec, &id, &event_name).await?],
            format
        )?,
        Command::InitSchema => {
            admin.init_schema().await?;
            "Schema ready".to_owned()
        }
        Command::Fields {
            ..
        } => String::new()
    };

    println!("{out}");
    Ok(())
}
