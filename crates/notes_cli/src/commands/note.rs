use super::{identifier, optional_text, CommandEnv};
use crate::cli::{NoteCommand, OutputFormat};
use crate::format::{write_json, write_notes_markdown, write_notes_table};
use crate::prompt::{confirm, Prompter};
use anyhow::{bail, Context, Result};
use log::info;
use notes_core::model::split_tags;
use notes_core::{short_id, NewNote, Note, NoteFilter, NotePatch};
use std::io::Write;
use std::path::Path;
use std::process::Command;

const FALLBACK_EDITOR: &str = if cfg!(windows) { "notepad" } else { "vi" };

pub(super) fn run<P: Prompter, W: Write>(
    env: &mut CommandEnv<'_, P, W>,
    command: NoteCommand,
) -> Result<()> {
    match command {
        NoteCommand::Create {
            title,
            content,
            package,
            tags,
        } => {
            let package = env.package_named(package.as_deref())?;
            let note = env.workspace.notes.create_note(NewNote {
                title,
                content: content.unwrap_or_default(),
                package_id: package.map(|package| package.id),
                tags: tags.as_deref().map(split_tags).unwrap_or_default(),
                ..NewNote::default()
            })?;
            writeln!(env.out, "Created note {}: {}", short_id(&note.id), note.title)?;
            Ok(())
        }
        NoteCommand::List { package, format } => {
            let package = env.package_named(package.as_deref())?;
            let filter = NoteFilter {
                package_id: package.map(|package| package.id),
            };
            let notes = env.workspace.notes.list_notes(&filter)?;
            match format {
                OutputFormat::Table => write_notes_table(&mut env.out, &notes)?,
                OutputFormat::Json => write_json(&mut env.out, &notes)?,
                OutputFormat::Markdown => write_notes_markdown(&mut env.out, &notes)?,
            }
            Ok(())
        }
        NoteCommand::Edit { id } => {
            let found = env.workspace.notes.find_note(identifier(&id)?);
            let note = env.located(found, "notes note edit")?;
            let edited = edit_in_editor(&note)?;
            let patch = edit_patch(&note, &edited);
            if patch.is_empty() {
                writeln!(env.out, "No changes to note '{}'.", note.title)?;
                return Ok(());
            }
            let note = env.workspace.notes.update_note(&note.id, &patch)?;
            writeln!(env.out, "Note '{}' updated successfully", note.title)?;
            Ok(())
        }
        NoteCommand::Delete { id, yes } => {
            let found = env.workspace.notes.find_note(identifier(&id)?);
            let note = env.located(found, "notes note delete")?;
            let prompt = format!("Delete note '{}'? (y/N): ", note.title);
            if !yes && !confirm(&mut env.prompter, &prompt)? {
                writeln!(env.out, "Deletion cancelled.")?;
                return Ok(());
            }
            env.workspace.notes.delete_note(&note.id)?;
            info!("event=cli_note_delete module=cli status=ok");
            writeln!(env.out, "Deleted note: {}", note.title)?;
            Ok(())
        }
    }
}

/// Round-trips the note through `$VISUAL`/`$EDITOR` as a markdown file.
fn edit_in_editor(note: &Note) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("note-")
        .suffix(".md")
        .tempfile()
        .context("cannot create a temporary file for the editor")?;
    std::fs::write(file.path(), note_document(note))
        .context("cannot write the temporary note file")?;

    launch_editor(file.path())?;

    std::fs::read_to_string(file.path()).context("cannot read the edited note back")
}

fn launch_editor(path: &Path) -> Result<()> {
    let configured = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| FALLBACK_EDITOR.to_string());
    let Some(mut words) = shlex::split(&configured).filter(|words| !words.is_empty()) else {
        bail!("cannot parse editor command `{configured}`");
    };
    let program = words.remove(0);

    let status = Command::new(&program)
        .args(&words)
        .arg(path)
        .status()
        .with_context(|| format!("cannot start editor `{program}`"))?;
    if !status.success() {
        bail!("editor `{program}` exited with {status}");
    }
    Ok(())
}

/// `# title`, a blank line, then the body.
pub(crate) fn note_document(note: &Note) -> String {
    format!("# {}\n\n{}", note.title, note.content)
}

/// Splits an edited document into an optional new title and the body.
///
/// A leading `# ` line supplies the title and the body starts two lines
/// below it; otherwise the whole text is the body.
pub(crate) fn split_edited_note(text: &str) -> (Option<String>, String) {
    let lines: Vec<&str> = text.split('\n').collect();
    match lines.first().and_then(|first| first.strip_prefix("# ")) {
        Some(heading) => {
            let body = lines.get(2..).map(|rest| rest.join("\n")).unwrap_or_default();
            (optional_text(heading.to_string()), body.trim().to_string())
        }
        None => (None, text.trim().to_string()),
    }
}

fn edit_patch(note: &Note, edited: &str) -> NotePatch {
    let (title, content) = split_edited_note(edited);
    NotePatch {
        title: title.filter(|title| title != &note.title),
        content: (content != note.content).then_some(content),
        ..NotePatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::{edit_patch, note_document, run, split_edited_note};
    use crate::cli::NoteCommand;
    use crate::commands::test_support::{env, output};
    use notes_core::{open_db_in_memory, Note, NoteFilter};

    #[test]
    fn heading_line_becomes_title() {
        let (title, body) = split_edited_note("# Groceries\r\n\nmilk\neggs\n");
        assert_eq!(title.as_deref(), Some("Groceries"));
        assert_eq!(body, "milk\neggs");

        let (title, body) = split_edited_note("# Groceries\n\nmilk\n");
        assert_eq!(title.as_deref(), Some("Groceries"));
        assert_eq!(body, "milk");
    }

    #[test]
    fn text_without_heading_is_all_body() {
        let (title, body) = split_edited_note("  just words\nmore  \n");
        assert_eq!(title, None);
        assert_eq!(body, "just words\nmore");
    }

    #[test]
    fn unchanged_document_yields_empty_patch() {
        let note = Note::new("Plan", "step one");
        assert!(edit_patch(&note, &note_document(&note)).is_empty());

        let patch = edit_patch(&note, "# Plan v2\n\nstep one");
        assert_eq!(patch.title.as_deref(), Some("Plan v2"));
        assert_eq!(patch.content, None);
    }

    #[test]
    fn create_then_delete_with_confirmation() {
        let conn = open_db_in_memory().unwrap();
        let mut env = env(&conn, &["y"]);
        run(
            &mut env,
            NoteCommand::Create {
                title: "Ideas".into(),
                content: Some("- one".into()),
                package: None,
                tags: Some("x".into()),
            },
        )
        .unwrap();
        run(
            &mut env,
            NoteCommand::Delete {
                id: "ideas".into(),
                yes: false,
            },
        )
        .unwrap();

        assert!(output(&env).contains("Deleted note: Ideas"));
        assert!(env
            .workspace
            .notes
            .list_notes(&NoteFilter::default())
            .unwrap()
            .is_empty());
    }
}
