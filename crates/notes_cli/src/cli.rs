//! Command-line surface.
//!
//! Running `notes` with no subcommand starts the interactive shell.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "notes",
    version,
    about = "Tasks, notes and packages from the terminal",
    propagate_version = true
)]
pub struct Cli {
    /// Database file (default: ~/.notes/database.sqlite)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Task management
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
    /// Note management
    #[command(alias = "n")]
    Note {
        #[command(subcommand)]
        command: NoteCommand,
    },
    /// Package (project) management
    #[command(alias = "p")]
    Package {
        #[command(subcommand)]
        command: PackageCommand,
    },
    /// Search across tasks, notes and packages
    #[command(alias = "s")]
    Search {
        query: String,
        #[arg(long, value_enum, default_value_t = SearchFormat::Table)]
        format: SearchFormat,
    },
    /// Serve the HTTP API
    Server {
        #[arg(long, short)]
        port: Option<u16>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    Create(TaskCreateArgs),
    #[command(alias = "ls")]
    List(TaskListArgs),
    Update(TaskUpdateArgs),
    #[command(alias = "done")]
    Complete { id: String },
    #[command(alias = "rm")]
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct TaskCreateArgs {
    pub title: String,
    #[arg(long, short)]
    pub description: Option<String>,
    /// YYYY-MM-DD, "today", "tomorrow" or "next week"
    #[arg(long)]
    pub due: Option<String>,
    #[arg(long, short, value_enum, default_value_t = PriorityArg::Medium)]
    pub priority: PriorityArg,
    /// Package name
    #[arg(long)]
    pub package: Option<String>,
    /// Comma-separated
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args, Debug)]
pub struct TaskListArgs {
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,
    /// Package name
    #[arg(long)]
    pub package: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct TaskUpdateArgs {
    /// Id, id prefix or title fragment
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    /// An empty value clears the description
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,
    #[arg(long)]
    pub due: Option<String>,
    /// Comma-separated; an empty value clears the tags
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    Create {
        title: String,
        #[arg(long, short)]
        content: Option<String>,
        /// Package name
        #[arg(long)]
        package: Option<String>,
        #[arg(long)]
        tags: Option<String>,
    },
    #[command(alias = "ls")]
    List {
        /// Package name
        #[arg(long)]
        package: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Open the note in $EDITOR
    Edit { id: String },
    #[command(alias = "rm")]
    Delete {
        id: String,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PackageCommand {
    Create {
        name: String,
        #[arg(long, short)]
        description: Option<String>,
        /// Parent package name
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    #[command(alias = "ls")]
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    Archive { id: String },
    /// Delete a package with all of its tasks and notes
    #[command(alias = "rm")]
    Delete {
        id: String,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Urgent,
}

impl From<StatusArg> for notes_core::TaskStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => Self::Pending,
            StatusArg::InProgress => Self::InProgress,
            StatusArg::Completed => Self::Completed,
            StatusArg::Cancelled => Self::Cancelled,
        }
    }
}

impl From<PriorityArg> for notes_core::Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Self::Low,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::High => Self::High,
            PriorityArg::Urgent => Self::Urgent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, OutputFormat, TaskCommand};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["notes"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "notes", "task", "list", "--format", "json", "--db", "/tmp/x.sqlite",
        ])
        .unwrap();
        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/x.sqlite")));
        match cli.command {
            Some(Commands::Task {
                command: TaskCommand::List(args),
            }) => assert_eq!(args.format, OutputFormat::Json),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn kebab_case_status_values() {
        let cli = Cli::try_parse_from(["notes", "task", "list", "--status", "in-progress"]);
        assert!(cli.is_ok());
        assert!(Cli::try_parse_from(["notes", "task", "list", "--status", "done"]).is_err());
    }
}
