//! Command-line front end for the task list.
//!
//! # Responsibility
//! - Translate arguments into task intents against the SQLite-backed store.
//! - Render the resulting list as plain text.

mod app;
mod cli;
mod config;
mod render;

use clap::Parser;
use cli::{Cli, Command};
use config::CliConfig;
use log::error;
use std::process::ExitCode;
use tasklist_core::db::open_db;
use tasklist_core::init_logging;

fn main() -> ExitCode {
    let Cli { command } = Cli::parse();

    let config = CliConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&config, command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CliConfig, command: Command) -> Result<String, Box<dyn std::error::Error>> {
    // `ping` and `version` must work without touching the database.
    match command {
        Command::Ping => return Ok(app::ping_line()),
        Command::Version => return Ok(app::version_line()),
        _ => {}
    }

    let conn = open_db(&config.db_path)?;
    app::run_on_connection(&conn, command)
}
