//! `ems` console entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the store once.
//! - Hand the store to the console menu for the rest of the session.
//! - Close the store and flush logs on the way out, including after errors.

mod config;
mod console;
mod input;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::CliConfig;
use console::Console;
use ems_core::db::{close_db, open_db, open_db_in_memory};
use ems_core::{flush_logging, init_logging, EmployeeService, SqliteEmployeeRepository};
use log::{error, info};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CliConfig::parse();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ems: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CliConfig) -> Result<()> {
    let working_dir = std::env::current_dir().context("cannot read working directory")?;
    init_logging(
        config.effective_log_level(),
        config.absolute_log_dir(&working_dir),
    )
    .map_err(|err| anyhow!(err))?;

    let outcome = open_and_serve(config);
    if let Err(err) = &outcome {
        error!("event=session_end module=cli status=error error={err:#}");
    }
    flush_logging();
    outcome
}

// Everything after logging starts; the caller flushes logs whatever this returns.
fn open_and_serve(config: &CliConfig) -> Result<()> {
    let conn = if config.in_memory {
        open_db_in_memory().context("cannot open in-memory database")?
    } else {
        open_db(&config.db)
            .with_context(|| format!("cannot open database `{}`", config.db.display()))?
    };
    info!(
        "event=session_start module=cli status=ok in_memory={}",
        config.in_memory
    );

    let session = run_session(&conn);
    let closed = close_db(conn).context("cannot close database cleanly");
    session?;
    closed
}

fn run_session(conn: &rusqlite::Connection) -> Result<()> {
    let repo = SqliteEmployeeRepository::try_new(conn).context("database is not ready")?;
    let service = EmployeeService::new(repo);

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(&service, stdin.lock(), stdout.lock())
        .run()
        .context("console I/O failed")
}
