//! `notes` binary entry point.
//!
//! # Responsibility
//! - Resolve configuration, start file logging and open the database.
//! - Hand off to a scriptable subcommand, the HTTP server or the shell.
//!
//! # Invariants
//! - A logging failure is reported on stderr and never stops the command.
//! - Errors reach the user once, as `Error: ...`, with a failure exit code.

mod cli;
mod commands;
mod format;
mod prompt;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use commands::CommandEnv;
use format::Palette;
use notes_core::{init_logging, open_db, AppConfig, Workspace};
use prompt::StdinPrompter;
use shell::{Shell, ShellSettings};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let port = match &cli.command {
        Some(Commands::Server { port }) => *port,
        _ => None,
    };
    let config = AppConfig::load()
        .context("cannot load configuration")?
        .with_overrides(cli.db, cli.log_level, port);

    let app = match &cli.command {
        None => "shell",
        Some(Commands::Server { .. }) => "api",
        Some(_) => "cli",
    };
    start_logging(&config, app);

    match cli.command {
        None => run_shell(&config),
        Some(Commands::Server { .. }) => run_server(&config),
        Some(command) => {
            let conn = open_db(&config.db_path)?;
            let mut env = CommandEnv {
                workspace: Workspace::new(&conn),
                completed_window: config.completed_window(),
                palette: Palette::detect(),
                prompter: StdinPrompter,
                out: io::stdout().lock(),
            };
            commands::run(&mut env, command)
        }
    }
}

fn start_logging(config: &AppConfig, app: &str) {
    let log_dir = absolute(&config.log_dir);
    if let Err(err) = init_logging(&config.log_level, &log_dir, app) {
        eprintln!("warning: file logging disabled: {err}");
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn run_shell(config: &AppConfig) -> Result<()> {
    let conn = open_db(&config.db_path)?;
    let settings = ShellSettings {
        db_path: config.db_path.clone(),
        server_port: config.server_port,
        completed_window: config.completed_window(),
    };
    let mut shell = Shell::new(
        Workspace::new(&conn),
        settings,
        Palette::detect(),
        StdinPrompter,
        io::stdout(),
    );
    shell.run()
}

fn run_server(config: &AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("cannot start the async runtime")?;
    println!("Serving on http://127.0.0.1:{}", config.server_port);
    runtime.block_on(notes_api::serve(config.db_path.clone(), config.server_port))?;
    Ok(())
}
