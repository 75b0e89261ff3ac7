//! Full-screen task editor on a raw terminal.
//!
//! Keys become `InputEvent`s and go through the core `FieldEditor`; this
//! module only draws and translates.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, ClearType},
};
use log::warn;
use notes_core::editor::EditorState;
use notes_core::{EditorOutcome, FieldEditor, InputEvent, Task};
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;

/// Translates one key press for the editor's current state.
///
/// Esc discards the edit buffer while editing and leaves the session
/// while navigating.
pub fn map_key(key: KeyEvent, state: &EditorState) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s' | 'S') if ctrl => Some(InputEvent::Save),
        KeyCode::Char('c' | 'C') if ctrl => Some(InputEvent::Cancel),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(ch) => Some(InputEvent::Char(ch)),
        KeyCode::Up => Some(InputEvent::FocusUp),
        KeyCode::Down => Some(InputEvent::FocusDown),
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Esc => match state {
            EditorState::Editing { .. } => Some(InputEvent::Abort),
            EditorState::Navigating { .. } => Some(InputEvent::Cancel),
        },
        _ => None,
    }
}

/// Text of one frame, top to bottom.
pub fn screen_lines(title: &str, editor: &FieldEditor) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        format!("   EDITING TASK: {title}"),
        rule,
        "Use Up/Down to navigate, Enter to edit, Ctrl+C to cancel, Ctrl+S to save".to_string(),
        String::new(),
    ];

    let (focus, buffer) = match editor.state() {
        EditorState::Navigating { focus } => (*focus, None),
        EditorState::Editing { focus, buffer } => (*focus, Some(buffer.as_str())),
    };
    for (index, (field, value)) in editor.entries().enumerate() {
        let line = match (index == focus, buffer) {
            (true, Some(buffer)) => format!("> {:<12}: {buffer}█", field.label()),
            (true, None) => format!("> {:<12}: {value}", field.label()),
            (false, _) => format!("  {:<12}: {value}", field.label()),
        };
        lines.push(line);
    }

    lines.push(String::new());
    lines.push(if buffer.is_some() {
        "Type new value, Enter to confirm, Esc to discard".to_string()
    } else {
        "Press Enter to edit field, Ctrl+S to save all changes".to_string()
    });
    lines
}

/// Restores the terminal however the editor exits.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Runs the full-screen editor for `task`.
///
/// Returns `None` when the terminal cannot switch to raw mode; callers
/// then fall back to line-by-line prompts.
pub fn edit_in_terminal(task: &Task) -> io::Result<Option<(FieldEditor, EditorOutcome)>> {
    let _guard = match RawModeGuard::enable() {
        Ok(guard) => guard,
        Err(err) => {
            warn!(
                "event=raw_mode module=shell status=error fallback=linear kind={:?}",
                err.kind()
            );
            return Ok(None);
        }
    };

    let mut stdout = io::stdout();
    let mut editor = FieldEditor::new(task);
    loop {
        draw(&mut stdout, &task.title, &editor)?;
        if let Event::Key(key) = event::read()? {
            if let Some(input) = map_key(key, editor.state()) {
                if let Some(outcome) = editor.handle(input) {
                    return Ok(Some((editor, outcome)));
                }
            }
        }
    }
}

fn draw(stdout: &mut io::Stdout, title: &str, editor: &FieldEditor) -> io::Result<()> {
    queue!(stdout, terminal::Clear(ClearType::All))?;
    for (row, line) in screen_lines(title, editor).iter().enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(stdout, cursor::MoveTo(0, row), Print(line))?;
    }
    stdout.flush()
}
