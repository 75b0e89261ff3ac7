//! Terminal renderers shared by the scriptable CLI and the shell.
//!
//! Tables are one line per record with 8-character short ids, matching
//! what the resolver accepts back as an identifier.

use crossterm::style::Stylize;
use notes_core::dates::{format_date, format_datetime, format_month_day};
use notes_core::present::codes::{package_status_code, priority_code, task_status_code};
use notes_core::present::preview::{markdown_preview, truncate};
use notes_core::present::{recent_view, RankedTask};
use notes_core::{short_id, EntityRef, Note, Package, PackageStatus, Priority, Task, TaskStatus};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

const TASK_TITLE_WIDTH: usize = 40;
const QUICK_TITLE_WIDTH: usize = 35;
const QUICK_DESCRIPTION_WIDTH: usize = 25;
const NOTE_TITLE_WIDTH: usize = 35;
const PACKAGE_NAME_WIDTH: usize = 30;
const CANDIDATE_PREVIEW_WIDTH: usize = 100;

/// Whether output lines get ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Done,
    Muted,
    Busy,
    Urgent,
    High,
    Medium,
    Low,
    Plain,
}

impl Palette {
    /// Colors only for a real terminal that is not `dumb` and without `NO_COLOR`.
    pub fn detect() -> Self {
        let color = io::stdout().is_terminal()
            && std::env::var("TERM").unwrap_or_default() != "dumb"
            && std::env::var_os("NO_COLOR").is_none();
        Self { color }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(self, line: String, tone: Tone) -> String {
        if !self.color {
            return line;
        }
        match tone {
            Tone::Done => line.green().dim().to_string(),
            Tone::Muted => line.dark_grey().dim().to_string(),
            Tone::Busy => line.yellow().bold().to_string(),
            Tone::Urgent => line.red().bold().to_string(),
            Tone::High => line.magenta().to_string(),
            Tone::Medium => line.cyan().to_string(),
            Tone::Low => line.white().to_string(),
            Tone::Plain => line,
        }
    }

    pub fn heading(self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn task_tone(task: &Task) -> Tone {
    match (task.status, task.priority) {
        (TaskStatus::Completed, _) => Tone::Done,
        (TaskStatus::Cancelled, _) => Tone::Muted,
        (TaskStatus::InProgress, _) => Tone::Busy,
        (_, Priority::Urgent) => Tone::Urgent,
        (_, Priority::High) => Tone::High,
        (_, Priority::Medium) => Tone::Medium,
        (_, Priority::Low) => Tone::Low,
    }
}

fn month_day_or_blank(epoch_ms: Option<i64>) -> String {
    epoch_ms
        .map(format_month_day)
        .unwrap_or_else(|| " ".repeat(5))
}

/// Compact task table, active tasks first.
///
/// With a `window`, completed tasks older than it are left out.
pub fn write_tasks_table(
    out: &mut impl Write,
    tasks: Vec<Task>,
    now: i64,
    window: Option<chrono::Duration>,
    palette: Palette,
) -> io::Result<()> {
    let visible = match window {
        Some(window) => recent_view(tasks, now, window),
        None => tasks,
    };
    if visible.is_empty() {
        return writeln!(out, "No tasks.");
    }
    for task in &visible {
        let line = format!(
            "{:<8} [{:<4}] [{}] {} {}",
            short_id(&task.id),
            task_status_code(task.status),
            priority_code(task.priority),
            month_day_or_blank(task.due_at),
            truncate(&task.title, TASK_TITLE_WIDTH)
        );
        writeln!(out, "{}", palette.paint(line, task_tone(task)))?;
    }
    Ok(())
}

/// One quick-glance row per ranked task.
pub fn write_ranked_rows(
    out: &mut impl Write,
    rows: &[RankedTask],
    palette: Palette,
) -> io::Result<()> {
    for row in rows {
        let task = &row.task;
        let due = row
            .due_label
            .map(|label| format!("({label})"))
            .unwrap_or_default();
        let description = task
            .description
            .as_deref()
            .map(|text| format!(" | {}", truncate(text, QUICK_DESCRIPTION_WIDTH)))
            .unwrap_or_default();
        let line = format!(
            "{} [{}] [{}] {:<12} {}{}",
            short_id(&task.id),
            task_status_code(task.status),
            priority_code(task.priority),
            due,
            truncate(&task.title, QUICK_TITLE_WIDTH),
            description
        );
        writeln!(out, "{}", palette.paint(line, task_tone(task)))?;
    }
    Ok(())
}

pub fn write_notes_table(out: &mut impl Write, notes: &[Note]) -> io::Result<()> {
    if notes.is_empty() {
        return writeln!(out, "No notes.");
    }
    for note in notes {
        let mut line = format!(
            "{:<8} {} {}",
            short_id(&note.id),
            format_month_day(note.updated_at),
            truncate(&note.title, NOTE_TITLE_WIDTH)
        );
        if !note.tags.is_empty() {
            let tags: Vec<&str> = note.tags.iter().take(2).map(String::as_str).collect();
            line.push_str(&format!(" [{}]", tags.join(",")));
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn write_packages_table(
    out: &mut impl Write,
    packages: &[Package],
    palette: Palette,
) -> io::Result<()> {
    if packages.is_empty() {
        return writeln!(out, "No packages.");
    }
    for package in packages {
        let line = format!(
            "{:<8} [{:<4}] {} {}",
            short_id(&package.id),
            package_status_code(package.status),
            month_day_or_blank(package.due_at),
            truncate(&package.name, PACKAGE_NAME_WIDTH)
        );
        let tone = match package.status {
            PackageStatus::Completed => Tone::Done,
            PackageStatus::Archived => Tone::Muted,
            PackageStatus::Active => Tone::Plain,
        };
        writeln!(out, "{}", palette.paint(line, tone))?;
    }
    Ok(())
}

pub fn write_tasks_markdown(out: &mut impl Write, tasks: &[Task]) -> io::Result<()> {
    for task in tasks {
        writeln!(out, "## {}", task.title)?;
        writeln!(out, "- **Status**: {}", task.status.as_str())?;
        writeln!(out, "- **Priority**: {}", task.priority.as_str())?;
        if let Some(due_at) = task.due_at {
            writeln!(out, "- **Due**: {}", format_date(due_at))?;
        }
        if let Some(description) = task.description.as_deref() {
            writeln!(out, "- **Description**: {description}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_notes_markdown(out: &mut impl Write, notes: &[Note]) -> io::Result<()> {
    for note in notes {
        writeln!(out, "## {}", note.title)?;
        if !note.content.is_empty() {
            writeln!(out, "{}", note.content)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_packages_markdown(out: &mut impl Write, packages: &[Package]) -> io::Result<()> {
    for package in packages {
        writeln!(out, "## {}", package.name)?;
        if let Some(description) = package.description.as_deref() {
            writeln!(out, "- **Description**: {description}")?;
        }
        writeln!(out, "- **Status**: {}", package.status.as_str())?;
        if let Some(due_at) = package.due_at {
            writeln!(out, "- **Due**: {}", format_date(due_at))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_json(out: &mut impl Write, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    writeln!(out)
}

/// Full task details for `task <id>`.
pub fn write_task_details(out: &mut impl Write, task: &Task) -> io::Result<()> {
    writeln!(out, "Task: {}", task.title)?;
    writeln!(out, "ID: {}", task.id)?;
    writeln!(out, "Status: {}", task.status.as_str())?;
    writeln!(out, "Priority: {}", task.priority.as_str())?;
    if let Some(description) = task.description.as_deref() {
        writeln!(out, "Description: {description}")?;
    }
    if let Some(due_at) = task.due_at {
        writeln!(out, "Due date: {}", format_datetime(due_at))?;
    }
    if !task.tags.is_empty() {
        writeln!(out, "Tags: {}", task.tags.join(", "))?;
    }
    writeln!(out, "Created: {}", format_datetime(task.created_at))?;
    writeln!(out, "Updated: {}", format_datetime(task.updated_at))?;
    if let Some(completed_at) = task.completed_at {
        writeln!(out, "Completed: {}", format_datetime(completed_at))?;
    }
    writeln!(out)
}

/// Full note details for `note <id>`.
pub fn write_note_details(out: &mut impl Write, note: &Note) -> io::Result<()> {
    let rule = "-".repeat(50);
    writeln!(out, "Note: {}", note.title)?;
    writeln!(out, "ID: {}", note.id)?;
    if !note.tags.is_empty() {
        writeln!(out, "Tags: {}", note.tags.join(", "))?;
    }
    if !note.linked_tasks.is_empty() {
        let linked: Vec<&str> = note.linked_tasks.iter().map(|id| short_id(id)).collect();
        writeln!(out, "Linked tasks: {}", linked.join(", "))?;
    }
    writeln!(out, "Created: {}", format_datetime(note.created_at))?;
    writeln!(out, "Updated: {}", format_datetime(note.updated_at))?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{}", note.content)?;
    writeln!(out, "{rule}")?;
    writeln!(out)
}

/// Lists every candidate of an ambiguous identifier and the exact
/// commands that would pick each one.
pub fn write_candidates(
    out: &mut impl Write,
    identifier: &str,
    candidates: &[EntityRef],
    command: &str,
) -> io::Result<()> {
    let kind = candidates
        .first()
        .map(|candidate| candidate.kind().as_str())
        .unwrap_or("item");
    writeln!(out)?;
    writeln!(out, "Multiple {kind}s match '{identifier}':")?;
    writeln!(out, "{}", "=".repeat(80))?;

    for (index, candidate) in candidates.iter().enumerate() {
        let number = index + 1;
        match candidate {
            EntityRef::Task(task) => {
                writeln!(
                    out,
                    "{number:2}. [{}] [{}] {}",
                    priority_code(task.priority),
                    task_status_code(task.status),
                    task.title
                )?;
                let due = task
                    .due_at
                    .map(|due_at| format!(" | Due: {}", format_date(due_at)))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "    ID: {} | Status: {} | Priority: {}{}",
                    short_id(&task.id),
                    task.status.as_str(),
                    task.priority.as_str(),
                    due
                )?;
                if let Some(description) = task.description.as_deref() {
                    writeln!(out, "    {}", truncate(description, CANDIDATE_PREVIEW_WIDTH))?;
                }
                write_tags_line(out, &task.tags)?;
            }
            EntityRef::Note(note) => {
                writeln!(out, "{number:2}. {}", note.title)?;
                writeln!(
                    out,
                    "    ID: {} | Updated: {}",
                    short_id(&note.id),
                    format_datetime(note.updated_at)
                )?;
                if let Some(preview) = markdown_preview(&note.content, CANDIDATE_PREVIEW_WIDTH) {
                    writeln!(out, "    {preview}")?;
                }
                write_tags_line(out, &note.tags)?;
            }
            EntityRef::Package(package) => {
                writeln!(
                    out,
                    "{number:2}. [{}] {}",
                    package_status_code(package.status),
                    package.name
                )?;
                writeln!(
                    out,
                    "    ID: {} | Status: {}",
                    short_id(&package.id),
                    package.status.as_str()
                )?;
                if let Some(description) = package.description.as_deref() {
                    writeln!(out, "    {}", truncate(description, CANDIDATE_PREVIEW_WIDTH))?;
                }
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "Use the exact ID (8 characters) to specify which {kind}:")?;
    for candidate in candidates {
        let (id, title) = match candidate {
            EntityRef::Task(task) => (task.id.as_str(), task.title.as_str()),
            EntityRef::Note(note) => (note.id.as_str(), note.title.as_str()),
            EntityRef::Package(package) => (package.id.as_str(), package.name.as_str()),
        };
        writeln!(out, "   {command} {}    # {title}", short_id(id))?;
    }
    writeln!(out)
}

fn write_tags_line(out: &mut impl Write, tags: &[String]) -> io::Result<()> {
    if tags.is_empty() {
        return Ok(());
    }
    writeln!(out, "    Tags: {}", tags.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_core::present::rank;

    fn render(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn task(id: &str, title: &str) -> Task {
        let mut task = Task::new(title);
        task.id = id.to_string();
        task
    }

    #[test]
    fn compact_table_hides_stale_completions() {
        let now = 10 * 24 * 60 * 60 * 1000;
        let mut stale = task("aaaaaaaa-1", "Old win");
        stale.status = TaskStatus::Completed;
        stale.completed_at = Some(0);
        let open = task("bbbbbbbb-2", "Still open");

        let text = render(|out| {
            write_tasks_table(
                out,
                vec![stale, open],
                now,
                Some(chrono::Duration::days(7)),
                Palette::plain(),
            )
        });
        assert!(text.contains("bbbbbbbb [TODO] [M]"));
        assert!(!text.contains("Old win"));
    }

    #[test]
    fn empty_tables_say_so() {
        assert_eq!(render(|out| write_notes_table(out, &[])), "No notes.\n");
        assert_eq!(
            render(|out| write_packages_table(out, &[], Palette::plain())),
            "No packages.\n"
        );
    }

    #[test]
    fn ranked_rows_carry_description_suffix() {
        let mut first = task("cccccccc-3", "Write report");
        first.description = Some("quarterly numbers for the board meeting".into());
        let rows = rank(vec![first], false, chrono::Local::now().date_naive());
        let text = render(|out| write_ranked_rows(out, &rows, Palette::plain()));
        assert!(text.starts_with("cccccccc [TODO] [M]"));
        assert!(text.contains("| quarterly numbers for the..."));
    }

    #[test]
    fn candidates_list_suggests_exact_commands() {
        let candidates = vec![
            EntityRef::Task(task("aaa11122-x", "Fix bug")),
            EntityRef::Task(task("bbb22233-y", "Fix typo")),
        ];
        let text = render(|out| write_candidates(out, "Fix", &candidates, "complete"));
        assert!(text.contains("Multiple tasks match 'Fix':"));
        assert!(text.contains(" 1. [M] [TODO] Fix bug"));
        assert!(text.contains(" 2. [M] [TODO] Fix typo"));
        assert!(text.contains("   complete aaa11122    # Fix bug"));
    }

    #[test]
    fn plain_palette_leaves_text_alone() {
        assert_eq!(Palette::plain().paint("x".into(), Tone::Urgent), "x");
    }
}
