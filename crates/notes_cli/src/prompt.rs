//! Line input for confirmations and follow-up questions.

use notes_core::editor::linear::is_yes;
use std::io::{self, BufRead, IsTerminal, Write};

/// Source of typed answers.
pub trait Prompter {
    /// Shows `prompt` and reads one line without its line ending.
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Whether a person is typing, so raw key handling is worth trying.
    fn is_interactive(&self) -> bool {
        false
    }
}

/// Prompts on stdout, reads stdin.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal() && io::stdout().is_terminal()
    }
}

/// Reads an answer; end of input counts as blank.
pub fn ask(prompter: &mut impl Prompter, prompt: &str) -> io::Result<String> {
    Ok(prompter.read_line(prompt)?.unwrap_or_default())
}

/// `(y/N)` question: only an explicit yes confirms.
pub fn confirm(prompter: &mut impl Prompter, prompt: &str) -> io::Result<bool> {
    Ok(is_yes(&ask(prompter, prompt)?))
}

/// Replays canned answers and records every prompt shown.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    replies: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|reply| reply.to_string()).collect(),
            prompts: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.replies.pop_front())
    }
}
