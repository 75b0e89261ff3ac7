//! Handlers behind the scriptable subcommands.
//!
//! Each handler runs against one `Workspace`, writes to `out` and asks
//! follow-up questions through a `Prompter`, so tests drive them with an
//! in-memory database and a byte buffer.

mod note;
mod package;
mod search;
mod task;

use crate::cli::Commands;
use crate::format::{write_candidates, Palette};
use crate::prompt::Prompter;
use anyhow::Result;
use notes_core::{Package, ServiceError, ServiceResult, Workspace};
use std::io::Write;

/// Everything a handler needs besides its arguments.
pub struct CommandEnv<'conn, P, W> {
    pub workspace: Workspace<'conn>,
    pub completed_window: chrono::Duration,
    pub palette: Palette,
    pub prompter: P,
    pub out: W,
}

impl<'conn, P: Prompter, W: Write> CommandEnv<'conn, P, W> {
    /// Unwraps a lookup; ambiguous identifiers print their candidates
    /// (with `command` as the suggested follow-up) before failing.
    pub fn located<T>(&mut self, result: ServiceResult<T>, command: &str) -> Result<T> {
        match result {
            Ok(found) => Ok(found),
            Err(err) => {
                if let ServiceError::Ambiguous {
                    identifier,
                    candidates,
                    ..
                } = &err
                {
                    write_candidates(&mut self.out, identifier, candidates, command)?;
                }
                Err(err.into())
            }
        }
    }

    /// `--package NAME` lookup.
    pub fn package_named(&self, name: Option<&str>) -> Result<Option<Package>> {
        match name {
            Some(name) => Ok(Some(self.workspace.packages.require_by_name(name)?)),
            None => Ok(None),
        }
    }
}

/// Runs one non-shell subcommand. `server` is handled by the binary.
pub fn run<P: Prompter, W: Write>(env: &mut CommandEnv<'_, P, W>, command: Commands) -> Result<()> {
    match command {
        Commands::Task { command } => task::run(env, command),
        Commands::Note { command } => note::run(env, command),
        Commands::Package { command } => package::run(env, command),
        Commands::Search { query, format } => search::run(env, &query, format),
        Commands::Server { .. } => anyhow::bail!("the server command is not available here"),
    }
}

/// Blank identifiers would match every titled record, so they never reach
/// the resolver.
fn identifier(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("an id, id prefix or title fragment is required");
    }
    Ok(trimmed)
}

/// Empty option values mean "clear".
fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
