//! Shell command line parsing.

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Quit,
    Status,
    Clear,
    Gui,
    List { show_all: bool },
    Packages,
    SwitchPackage(String),
    CreatePackage(String),
    PackageInfo,
    Tasks,
    ShowTask(String),
    CreateTask(String),
    Edit(String),
    Complete(String),
    Remove(String),
    Archive(String),
    Notes,
    ShowNote(String),
    CreateNote(String),
    Search(String),
    /// A known command missing its argument; carries the usage line.
    Usage(&'static str),
    Unknown(String),
}

impl ShellCommand {
    /// Parses a line; blank lines yield `None`.
    ///
    /// Words are split shell-style so quoted titles stay whole. Unbalanced
    /// quotes fall back to plain whitespace splitting.
    pub fn parse(line: &str) -> Option<Self> {
        let words = shlex::split(line.trim())
            .unwrap_or_else(|| line.split_whitespace().map(str::to_string).collect());
        let (head, args) = words.split_first()?;
        let name = head.to_lowercase();
        let rest = args.join(" ");

        let with_arg = |build: fn(String) -> ShellCommand, usage: &'static str| {
            if rest.trim().is_empty() {
                ShellCommand::Usage(usage)
            } else {
                build(rest.clone())
            }
        };

        let command = match name.as_str() {
            "help" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "status" => Self::Status,
            "clear" => Self::Clear,
            "gui" => Self::Gui,
            "list" | "ls" => Self::List {
                show_all: args.iter().any(|arg| arg == "-a" || arg == "--all"),
            },
            "packages" | "p" => Self::Packages,
            "package" => with_arg(Self::SwitchPackage, "Usage: package <name>"),
            "create-package" => with_arg(Self::CreatePackage, "Usage: create-package <name>"),
            "package-info" => Self::PackageInfo,
            "tasks" | "t" => Self::Tasks,
            "task" => with_arg(Self::ShowTask, "Usage: task <id_or_title>"),
            "create-task" => with_arg(Self::CreateTask, "Usage: create-task <title>"),
            "edit" => with_arg(Self::Edit, "Usage: edit <id_or_title>"),
            "complete" => with_arg(Self::Complete, "Usage: complete <id_or_title>"),
            "rm" | "remove" => with_arg(Self::Remove, "Usage: rm <id_or_title>"),
            "archive" => with_arg(Self::Archive, "Usage: archive <id_or_title>"),
            "notes" | "n" => Self::Notes,
            "note" => with_arg(Self::ShowNote, "Usage: note <id_or_title>"),
            "create-note" => with_arg(Self::CreateNote, "Usage: create-note <title>"),
            "search" | "find" | "s" => with_arg(Self::Search, "Usage: search <query>"),
            _ => Self::Unknown(name),
        };
        Some(command)
    }

    /// Stable name for log lines; never includes arguments.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Quit => "quit",
            Self::Status => "status",
            Self::Clear => "clear",
            Self::Gui => "gui",
            Self::List { .. } => "list",
            Self::Packages => "packages",
            Self::SwitchPackage(_) => "package",
            Self::CreatePackage(_) => "create-package",
            Self::PackageInfo => "package-info",
            Self::Tasks => "tasks",
            Self::ShowTask(_) => "task",
            Self::CreateTask(_) => "create-task",
            Self::Edit(_) => "edit",
            Self::Complete(_) => "complete",
            Self::Remove(_) => "rm",
            Self::Archive(_) => "archive",
            Self::Notes => "notes",
            Self::ShowNote(_) => "note",
            Self::CreateNote(_) => "create-note",
            Self::Search(_) => "search",
            Self::Usage(_) => "usage",
            Self::Unknown(_) => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ShellCommand;

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(ShellCommand::parse(""), None);
        assert_eq!(ShellCommand::parse("   "), None);
    }

    #[test]
    fn aliases_map_to_the_same_command() {
        for line in ["quit", "exit", "q", "QUIT"] {
            assert_eq!(ShellCommand::parse(line), Some(ShellCommand::Quit));
        }
        assert_eq!(ShellCommand::parse("t"), Some(ShellCommand::Tasks));
        assert_eq!(ShellCommand::parse("n"), Some(ShellCommand::Notes));
        assert_eq!(ShellCommand::parse("p"), Some(ShellCommand::Packages));
        assert_eq!(
            ShellCommand::parse("find budget"),
            Some(ShellCommand::Search("budget".into()))
        );
        assert_eq!(
            ShellCommand::parse("remove abc"),
            Some(ShellCommand::Remove("abc".into()))
        );
    }

    #[test]
    fn quoted_titles_stay_whole() {
        assert_eq!(
            ShellCommand::parse(r#"complete "design wireframes""#),
            Some(ShellCommand::Complete("design wireframes".into()))
        );
        assert_eq!(
            ShellCommand::parse("create-task Buy more milk"),
            Some(ShellCommand::CreateTask("Buy more milk".into()))
        );
    }

    #[test]
    fn unbalanced_quote_falls_back_to_whitespace() {
        assert_eq!(
            ShellCommand::parse(r#"task "half open"#),
            Some(ShellCommand::ShowTask(r#""half open"#.into()))
        );
    }

    #[test]
    fn list_flags() {
        assert_eq!(
            ShellCommand::parse("ls"),
            Some(ShellCommand::List { show_all: false })
        );
        assert_eq!(
            ShellCommand::parse("list --all"),
            Some(ShellCommand::List { show_all: true })
        );
        assert_eq!(
            ShellCommand::parse("ls -a"),
            Some(ShellCommand::List { show_all: true })
        );
    }

    #[test]
    fn missing_argument_gives_usage() {
        assert_eq!(
            ShellCommand::parse("complete"),
            Some(ShellCommand::Usage("Usage: complete <id_or_title>"))
        );
        assert_eq!(
            ShellCommand::parse("package"),
            Some(ShellCommand::Usage("Usage: package <name>"))
        );
    }

    #[test]
    fn unknown_commands_are_reported_lowercased() {
        assert_eq!(
            ShellCommand::parse("Frobnicate now"),
            Some(ShellCommand::Unknown("frobnicate".into()))
        );
    }
}
