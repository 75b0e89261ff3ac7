//! Per-command shell handlers.

use super::term_editor::edit_in_terminal;
use super::Shell;
use crate::format::{
    write_note_details, write_notes_table, write_packages_table, write_ranked_rows,
    write_task_details, write_tasks_table,
};
use crate::prompt::{ask, confirm, Prompter};
use anyhow::Result;
use log::info;
use notes_core::dates::{format_date, parse_date};
use notes_core::editor::edit_linear;
use notes_core::model::{now_epoch_ms, split_tags};
use notes_core::present::{rank, QUICK_VIEW_LIMIT};
use notes_core::resolve::{ANY_KIND, ARCHIVABLE_KINDS};
use notes_core::{
    short_id, EditorOutcome, EntityRef, NewNote, NewPackage, NewTask, NoteFilter, PackageFilter,
    Priority, TaskFilter,
};
use std::io::Write;

/// A line holding only this ends multi-line note input.
const END_OF_CONTENT: &str = ".";

impl<'conn, P: Prompter, W: Write> Shell<'conn, P, W> {
    fn scope_suffix(&self) -> String {
        self.context
            .current_package()
            .map(|package| format!(" in {}", package.name))
            .unwrap_or_default()
    }

    fn task_filter(&self) -> TaskFilter {
        match self.context.current_package_id() {
            Some(id) => TaskFilter::in_package(id),
            None => TaskFilter::default(),
        }
    }

    pub(super) fn list_active(&mut self, show_all: bool) -> Result<()> {
        let tasks = self.workspace.tasks.list_tasks(&self.task_filter())?;
        let ranked = rank(tasks, show_all, chrono::Local::now().date_naive());

        writeln!(
            self.out,
            "{}",
            if show_all { "All Items:" } else { "Active Items:" }
        )?;
        if ranked.is_empty() {
            let what = if show_all { "No tasks" } else { "No active tasks" };
            let scope = self.scope_suffix();
            writeln!(
                self.out,
                "{what}{scope}. Use 'create-task <title>' to create one."
            )?;
            return Ok(());
        }

        let shown = if show_all {
            ranked.len()
        } else {
            ranked.len().min(QUICK_VIEW_LIMIT)
        };
        write_ranked_rows(&mut self.out, &ranked[..shown], self.palette)?;
        if ranked.len() > shown {
            writeln!(
                self.out,
                "... and {} more active tasks. Use 'tasks' to see all.",
                ranked.len() - shown
            )?;
        }
        writeln!(
            self.out,
            "Quick actions: 'complete <id>' to mark done, 'task <id>' for details"
        )?;
        Ok(())
    }

    pub(super) fn list_packages(&mut self) -> Result<()> {
        let packages = self
            .workspace
            .packages
            .list_packages(&PackageFilter::default())?;
        if packages.is_empty() {
            writeln!(
                self.out,
                "No packages found. Create one with 'create-package <name>'"
            )?;
            return Ok(());
        }
        writeln!(self.out, "Packages:")?;
        write_packages_table(&mut self.out, &packages, self.palette)?;
        writeln!(self.out)?;
        Ok(())
    }

    pub(super) fn switch_package(&mut self, name: &str) -> Result<()> {
        match self.workspace.packages.find_by_name(name)? {
            Some(package) => {
                writeln!(self.out, "Switched to package: {}", package.name)?;
                self.context.switch_to(package);
            }
            None => {
                writeln!(self.out, "Package '{name}' not found.")?;
                let packages = self
                    .workspace
                    .packages
                    .list_packages(&PackageFilter::default())?;
                if !packages.is_empty() {
                    writeln!(self.out, "Available packages:")?;
                    for package in packages {
                        writeln!(self.out, "  - {}", package.name)?;
                    }
                }
            }
        }
        Ok(())
    }

    pub(super) fn create_package(&mut self, name: String) -> Result<()> {
        let description = ask(
            &mut self.prompter,
            &format!("Description for '{name}' (optional): "),
        )?;
        let package = self.workspace.packages.create_package(NewPackage {
            name,
            description: non_blank(&description),
            ..NewPackage::default()
        })?;
        writeln!(self.out, "Package '{}' created successfully!", package.name)?;

        if confirm(&mut self.prompter, "Switch to this package? (y/N): ")? {
            writeln!(self.out, "Switched to package: {}", package.name)?;
            self.context.switch_to(package);
        }
        Ok(())
    }

    pub(super) fn show_package_info(&mut self) -> Result<()> {
        let Some(id) = self.context.current_package_id().map(str::to_string) else {
            writeln!(
                self.out,
                "No package selected. Use 'package <name>' to switch to a package."
            )?;
            return Ok(());
        };
        let details = self.workspace.package_details(&id)?;
        let package = &details.package;

        writeln!(self.out, "Package: {}", package.name)?;
        if let Some(description) = package.description.as_deref() {
            writeln!(self.out, "Description: {description}")?;
        }
        writeln!(self.out, "Status: {}", package.status.as_str())?;
        if let Some(due_at) = package.due_at {
            writeln!(self.out, "Due date: {}", format_date(due_at))?;
        }
        writeln!(self.out, "Tasks: {}", details.tasks.len())?;
        writeln!(self.out, "Notes: {}", details.notes.len())?;
        if !details.child_packages.is_empty() {
            writeln!(self.out, "Sub-packages: {}", details.child_packages.len())?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    pub(super) fn list_tasks(&mut self) -> Result<()> {
        let tasks = self.workspace.tasks.list_tasks(&self.task_filter())?;
        let scope = self.scope_suffix();
        if tasks.is_empty() {
            writeln!(self.out, "No tasks found{scope}.")?;
            return Ok(());
        }
        writeln!(self.out, "Tasks{scope}:")?;
        write_tasks_table(
            &mut self.out,
            tasks,
            now_epoch_ms(),
            Some(self.settings.completed_window),
            self.palette,
        )?;
        writeln!(self.out)?;
        Ok(())
    }

    pub(super) fn show_task(&mut self, identifier: &str) -> Result<()> {
        let found = self.workspace.tasks.find_task(identifier);
        if let Some(task) = self.pick(found, "task")? {
            write_task_details(&mut self.out, &task)?;
        }
        Ok(())
    }

    pub(super) fn create_task(&mut self, title: String) -> Result<()> {
        writeln!(self.out, "Creating task: {title}")?;
        let description = ask(&mut self.prompter, "Description (optional): ")?;

        writeln!(self.out, "Priority levels: low, medium, high, urgent")?;
        let priority = ask(&mut self.prompter, "Priority (medium): ")?;
        let priority = Priority::parse(&priority.trim().to_lowercase()).unwrap_or_default();

        let due = ask(&mut self.prompter, "Due date (YYYY-MM-DD or 'tomorrow'): ")?;
        let due_at = match non_blank(&due) {
            None => None,
            Some(input) => match parse_date(&input) {
                Ok(due_at) => Some(due_at),
                Err(_) => {
                    writeln!(self.out, "Invalid date format, skipping due date.")?;
                    None
                }
            },
        };

        let tags = ask(&mut self.prompter, "Tags (comma-separated): ")?;
        let task = self.workspace.tasks.create_task(NewTask {
            title,
            description: non_blank(&description),
            priority,
            due_at,
            package_id: self.context.current_package_id().map(str::to_string),
            tags: split_tags(&tags),
            ..NewTask::default()
        })?;
        writeln!(
            self.out,
            "Task '{}' created successfully! (ID: {})",
            task.title,
            short_id(&task.id)
        )?;
        Ok(())
    }

    pub(super) fn edit_task(&mut self, identifier: &str) -> Result<()> {
        let found = self.workspace.tasks.find_task(identifier);
        let Some(task) = self.pick(found, "edit")? else {
            return Ok(());
        };

        let full_screen = if self.prompter.is_interactive() {
            edit_in_terminal(&task)?
        } else {
            None
        };
        let (editor, outcome) = match full_screen {
            Some(session) => session,
            None => {
                writeln!(self.out, "Editing task: {}", task.title)?;
                writeln!(self.out, "Press Enter to keep the current value.")?;
                let prompter = &mut self.prompter;
                edit_linear(&task, |prompt| ask(&mut *prompter, prompt))?
            }
        };

        match outcome {
            EditorOutcome::Saved => {
                let saved = self.workspace.tasks.save_edits(&task, &editor)?;
                writeln!(self.out, "Task '{}' updated successfully!", saved.title)?;
            }
            EditorOutcome::Cancelled => {
                writeln!(self.out, "Edit cancelled. No changes were saved.")?;
            }
        }
        Ok(())
    }

    pub(super) fn complete_task(&mut self, identifier: &str) -> Result<()> {
        let found = self.workspace.tasks.find_task(identifier);
        if let Some(task) = self.pick(found, "complete")? {
            let task = self.workspace.tasks.complete_task(&task.id)?;
            writeln!(self.out, "Task '{}' marked as completed!", task.title)?;
        }
        Ok(())
    }

    /// Deletes whichever record the identifier resolves to, trying tasks,
    /// then notes, then packages.
    pub(super) fn remove(&mut self, identifier: &str) -> Result<()> {
        let found = self.workspace.find_entity(identifier, ANY_KIND);
        let Some(entity) = self.pick(found, "rm")? else {
            return Ok(());
        };

        let prompt = match &entity {
            EntityRef::Task(task) => format!("Delete task '{}'? (y/N): ", task.title),
            EntityRef::Note(note) => format!("Delete note '{}'? (y/N): ", note.title),
            EntityRef::Package(package) => {
                self.warn_about_contents(&package.id, &package.name)?;
                format!(
                    "Delete package '{}' and all its contents? (y/N): ",
                    package.name
                )
            }
        };
        if !confirm(&mut self.prompter, &prompt)? {
            writeln!(self.out, "Deletion cancelled.")?;
            return Ok(());
        }

        self.workspace.delete_entity(&entity)?;
        info!(
            "event=shell_delete module=shell status=ok kind={}",
            entity.kind()
        );
        match &entity {
            EntityRef::Task(task) => writeln!(self.out, "Task '{}' deleted.", task.title)?,
            EntityRef::Note(note) => writeln!(self.out, "Note '{}' deleted.", note.title)?,
            EntityRef::Package(package) => {
                self.context.forget_if_deleted(&package.id);
                writeln!(
                    self.out,
                    "Package '{}' and all its contents deleted.",
                    package.name
                )?;
            }
        }
        Ok(())
    }

    fn warn_about_contents(&mut self, package_id: &str, name: &str) -> Result<()> {
        let details = self.workspace.package_details(package_id)?;
        if details.tasks.is_empty() && details.notes.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "WARNING: Package '{name}' contains:")?;
        if !details.tasks.is_empty() {
            writeln!(self.out, "  {} tasks", details.tasks.len())?;
        }
        if !details.notes.is_empty() {
            writeln!(self.out, "  {} notes", details.notes.len())?;
        }
        writeln!(self.out, "  All contents will be deleted as well!")?;
        Ok(())
    }

    /// Cancels a task or archives a package.
    pub(super) fn archive(&mut self, identifier: &str) -> Result<()> {
        let found = self.workspace.find_entity(identifier, ARCHIVABLE_KINDS);
        let Some(entity) = self.pick(found, "archive")? else {
            return Ok(());
        };
        match self.workspace.archive_entity(&entity)? {
            EntityRef::Task(task) => writeln!(self.out, "Task '{}' archived.", task.title)?,
            EntityRef::Package(package) => {
                writeln!(self.out, "Package '{}' archived.", package.name)?
            }
            EntityRef::Note(note) => writeln!(self.out, "Note '{}' archived.", note.title)?,
        }
        self.context.refresh(&self.workspace)?;
        Ok(())
    }

    pub(super) fn list_notes(&mut self) -> Result<()> {
        let filter = NoteFilter {
            package_id: self.context.current_package_id().map(str::to_string),
        };
        let notes = self.workspace.notes.list_notes(&filter)?;
        let scope = self.scope_suffix();
        if notes.is_empty() {
            writeln!(self.out, "No notes found{scope}.")?;
            return Ok(());
        }
        writeln!(self.out, "Notes{scope}:")?;
        write_notes_table(&mut self.out, &notes)?;
        writeln!(self.out)?;
        Ok(())
    }

    pub(super) fn show_note(&mut self, identifier: &str) -> Result<()> {
        let found = self.workspace.notes.find_note(identifier);
        if let Some(note) = self.pick(found, "note")? {
            write_note_details(&mut self.out, &note)?;
        }
        Ok(())
    }

    pub(super) fn create_note(&mut self, title: String) -> Result<()> {
        writeln!(self.out, "Creating note: {title}")?;
        writeln!(
            self.out,
            "Enter note content (end with a line containing only '.' or Ctrl+D):"
        )?;
        let mut lines = Vec::new();
        while let Some(line) = self.prompter.read_line("")? {
            if line.trim() == END_OF_CONTENT {
                break;
            }
            lines.push(line);
        }

        let tags = ask(&mut self.prompter, "Tags (comma-separated): ")?;
        let note = self.workspace.notes.create_note(NewNote {
            title,
            content: lines.join("\n"),
            package_id: self.context.current_package_id().map(str::to_string),
            tags: split_tags(&tags),
            ..NewNote::default()
        })?;
        writeln!(
            self.out,
            "Note '{}' created successfully! (ID: {})",
            note.title,
            short_id(&note.id)
        )?;
        Ok(())
    }

    pub(super) fn search(&mut self, query: &str) -> Result<()> {
        let results = self.workspace.search(query)?;
        if results.is_empty() {
            writeln!(self.out, "No results found for '{query}'")?;
            return Ok(());
        }
        writeln!(
            self.out,
            "Search results for '{query}' ({} results):\n",
            results.total()
        )?;
        if !results.tasks.is_empty() {
            writeln!(self.out, "=== TASKS ===")?;
            write_tasks_table(&mut self.out, results.tasks, now_epoch_ms(), None, self.palette)?;
            writeln!(self.out)?;
        }
        if !results.notes.is_empty() {
            writeln!(self.out, "=== NOTES ===")?;
            write_notes_table(&mut self.out, &results.notes)?;
            writeln!(self.out)?;
        }
        if !results.packages.is_empty() {
            writeln!(self.out, "=== PACKAGES ===")?;
            write_packages_table(&mut self.out, &results.packages, self.palette)?;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
