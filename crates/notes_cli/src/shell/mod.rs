//! Interactive shell.
//!
//! # Responsibility
//! - Read commands, dispatch them against one `Workspace` and print results.
//! - Keep the current package in an explicit `SessionContext`.
//!
//! # Invariants
//! - A failing command prints its error and the loop continues.
//! - Ambiguous identifiers print every candidate and change nothing.
//! - Destructive commands run only after an explicit yes.

mod command;
mod context;
mod handlers;
mod term_editor;

use command::ShellCommand;
use context::SessionContext;

use crate::format::Palette;
use crate::prompt::Prompter;
use anyhow::Result;
use crossterm::{cursor, queue, terminal};
use log::{info, warn};
use notes_api::BackgroundServer;
use notes_core::{ServiceError, ServiceResult, TaskFilter, TaskStatus, Workspace};
use std::io::Write;
use std::path::PathBuf;

const HELP: &str = "
Available Commands:

GENERAL:
  help                      Show this help message
  quit, exit, q             Exit the shell
  status                    Show current status and statistics
  clear                     Clear the screen
  gui                       Start the web server and open it in a browser

QUICK VIEWS:
  list, ls                  Active tasks, most pressing first
  list -a, ls -a            Every task, including completed ones

PACKAGES:
  packages, p               List all packages
  package <name>            Switch to a package
  create-package <name>     Create a new package
  package-info              Show current package details

TASKS:
  tasks, t                  List tasks (in the current package if set)
  task <id>                 Show task details
  create-task <title>       Create a new task
  edit <id>                 Edit a task field by field
  complete <id>             Mark a task as completed
  archive <id>              Cancel a task or archive a package

NOTES:
  notes, n                  List notes (in the current package if set)
  note <id>                 Show note details
  create-note <title>       Create a new note

ANY ITEM:
  rm <id>, remove <id>      Delete a task, note or package (with its contents)

SEARCH:
  search, find, s <query>   Search titles and text everywhere

Identifiers can be an id prefix or part of a title.
Examples: complete \"wireframes\", rm meeting, archive \"old project\"
";

/// Settings the shell needs beyond the workspace.
#[derive(Debug, Clone)]
pub struct ShellSettings {
    pub db_path: PathBuf,
    pub server_port: u16,
    pub completed_window: chrono::Duration,
}

pub struct Shell<'conn, P, W> {
    workspace: Workspace<'conn>,
    context: SessionContext,
    settings: ShellSettings,
    palette: Palette,
    prompter: P,
    out: W,
    running: bool,
    server: Option<BackgroundServer>,
}

impl<'conn, P: Prompter, W: Write> Shell<'conn, P, W> {
    pub fn new(
        workspace: Workspace<'conn>,
        settings: ShellSettings,
        palette: Palette,
        prompter: P,
        out: W,
    ) -> Self {
        Self {
            workspace,
            context: SessionContext::default(),
            settings,
            palette,
            prompter,
            out,
            running: true,
            server: None,
        }
    }

    #[cfg(test)]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        info!("event=shell_start module=shell status=ok");
        self.show_banner()?;
        self.show_status()?;

        while self.running {
            let prompt = self.context.prompt();
            let Some(line) = self.prompter.read_line(&prompt)? else {
                writeln!(self.out, "\nGoodbye!")?;
                break;
            };
            let Some(command) = ShellCommand::parse(&line) else {
                continue;
            };
            self.dispatch(command)?;
        }

        info!("event=shell_stop module=shell status=ok");
        Ok(())
    }

    /// Executes one command. Only output failures escape; everything else
    /// is printed.
    pub fn dispatch(&mut self, command: ShellCommand) -> Result<()> {
        let name = command.name();
        match self.execute(command) {
            Ok(()) => Ok(()),
            Err(err) if err.downcast_ref::<std::io::Error>().is_some() => Err(err),
            Err(err) => {
                warn!("event=shell_command module=shell status=error command={name}");
                writeln!(self.out, "Error: {err}")?;
                Ok(())
            }
        }
    }

    fn execute(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Help => writeln!(self.out, "{HELP}")?,
            ShellCommand::Quit => {
                self.running = false;
                writeln!(self.out, "Goodbye!")?;
            }
            ShellCommand::Status => self.show_status()?,
            ShellCommand::Clear => {
                queue!(
                    self.out,
                    terminal::Clear(terminal::ClearType::All),
                    cursor::MoveTo(0, 0)
                )?;
                self.show_banner()?;
            }
            ShellCommand::Gui => self.launch_gui()?,
            ShellCommand::List { show_all } => self.list_active(show_all)?,
            ShellCommand::Packages => self.list_packages()?,
            ShellCommand::SwitchPackage(name) => self.switch_package(&name)?,
            ShellCommand::CreatePackage(name) => self.create_package(name)?,
            ShellCommand::PackageInfo => self.show_package_info()?,
            ShellCommand::Tasks => self.list_tasks()?,
            ShellCommand::ShowTask(identifier) => self.show_task(&identifier)?,
            ShellCommand::CreateTask(title) => self.create_task(title)?,
            ShellCommand::Edit(identifier) => self.edit_task(&identifier)?,
            ShellCommand::Complete(identifier) => self.complete_task(&identifier)?,
            ShellCommand::Remove(identifier) => self.remove(&identifier)?,
            ShellCommand::Archive(identifier) => self.archive(&identifier)?,
            ShellCommand::Notes => self.list_notes()?,
            ShellCommand::ShowNote(identifier) => self.show_note(&identifier)?,
            ShellCommand::CreateNote(title) => self.create_note(title)?,
            ShellCommand::Search(query) => self.search(&query)?,
            ShellCommand::Usage(usage) => writeln!(self.out, "{usage}")?,
            ShellCommand::Unknown(name) => {
                writeln!(self.out, "Unknown command: {name}")?;
                writeln!(self.out, "Type 'help' for available commands.")?;
            }
        }
        Ok(())
    }

    /// Unwraps a lookup for a command. Absence and ambiguity are printed
    /// and yield `None`; `command` is the suggested follow-up.
    fn pick<T>(&mut self, result: ServiceResult<T>, command: &str) -> Result<Option<T>> {
        match result {
            Ok(found) => Ok(Some(found)),
            Err(ServiceError::Ambiguous {
                identifier,
                candidates,
                ..
            }) => {
                crate::format::write_candidates(&mut self.out, &identifier, &candidates, command)?;
                Ok(None)
            }
            Err(err @ ServiceError::NotFound { .. }) => {
                writeln!(self.out, "{err}")?;
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn show_banner(&mut self) -> Result<()> {
        let title = self.palette.heading(&format!(
            "notes {} - tasks, notes and packages",
            env!("CARGO_PKG_VERSION")
        ));
        writeln!(self.out, "{title}")?;
        writeln!(
            self.out,
            "Interactive Mode - Type 'help' for commands or 'quit' to exit"
        )?;
        if let Some(package) = self.context.current_package() {
            writeln!(self.out, "Current package: {}", package.name)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn show_status(&mut self) -> Result<()> {
        let stats = self.workspace.stats()?;
        let count = |status: TaskStatus| {
            stats
                .tasks_by_status
                .get(status.as_str())
                .copied()
                .unwrap_or(0)
        };
        let high_active = self
            .workspace
            .tasks
            .list_tasks(&TaskFilter {
                priority: Some(notes_core::Priority::High),
                ..TaskFilter::default()
            })?
            .iter()
            .filter(|task| task.status != TaskStatus::Completed)
            .count();

        writeln!(self.out, "Current Status:")?;
        writeln!(self.out, "  Total tasks: {}", stats.tasks_total)?;
        writeln!(self.out, "  - Pending: {}", count(TaskStatus::Pending))?;
        writeln!(self.out, "  - In Progress: {}", count(TaskStatus::InProgress))?;
        writeln!(self.out, "  - Completed: {}", count(TaskStatus::Completed))?;
        writeln!(self.out, "  - High Priority (active): {high_active}")?;
        writeln!(self.out, "  Total notes: {}", stats.notes_total)?;
        writeln!(self.out, "  Total packages: {}", stats.packages_total)?;

        if let Some(package) = self.context.current_package() {
            let details = self.workspace.package_details(&package.id)?;
            writeln!(self.out, "\nCurrent Package: {}", details.package.name)?;
            writeln!(self.out, "  Tasks in package: {}", details.tasks.len())?;
            writeln!(self.out, "  Notes in package: {}", details.notes.len())?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn launch_gui(&mut self) -> Result<()> {
        if let Some(server) = &self.server {
            writeln!(self.out, "Web GUI already running at {}", server.url())?;
            return Ok(());
        }

        writeln!(self.out, "Starting web GUI server...")?;
        let server =
            notes_api::spawn_background(self.settings.db_path.clone(), self.settings.server_port)?;
        let url = server.url();
        match open::that(&url) {
            Ok(()) => writeln!(self.out, "Web GUI opened in your browser at {url}")?,
            Err(err) => {
                warn!("event=open_browser module=shell status=error kind={:?}", err.kind());
                writeln!(self.out, "Could not open a browser automatically.")?;
                writeln!(self.out, "Please open {url} manually.")?;
            }
        }
        writeln!(self.out, "The server will continue running in the background.")?;
        self.server = Some(server);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
