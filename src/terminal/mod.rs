pub mod markdown;

use std::collections::VecDeque;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use colored::*;
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor, EditMode};

use crate::error::{VoxError, VoxResult};
use crate::utils::path_utils;

/// Asks the user yes/no questions.
pub trait Prompter {
    fn confirm(&mut self, question: &str) -> VoxResult<bool>;
}

/// Interactive prompter backed by rustyline. Ctrl+C cancels, Ctrl+D declines.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str) -> VoxResult<bool> {
        let config = Config::builder()
            .edit_mode(EditMode::Emacs)
            .auto_add_history(false)
            .build();
        let mut editor = DefaultEditor::with_config(config)
            .map_err(|e| VoxError::Terminal(io::Error::new(io::ErrorKind::Other, e.to_string())))?;

        let mut retry = false;
        loop {
            match editor.readline(&confirm_prompt(question, retry)) {
                Ok(line) => match line.trim().to_ascii_lowercase().as_str() {
                    "y" | "yes" => return Ok(true),
                    "" | "n" | "no" => return Ok(false),
                    other => {
                        debug!("Unrecognised confirmation answer: {}", other);
                        retry = true;
                    }
                },
                Err(ReadlineError::Interrupted) => return Err(VoxError::Cancelled),
                Err(ReadlineError::Eof) => return Ok(false),
                Err(e) => {
                    return Err(VoxError::Terminal(io::Error::new(io::ErrorKind::Other, e.to_string())))
                }
            }
        }
    }
}

/// Question line for the editor. After an unusable answer the retry hint
/// is part of the prompt itself.
fn confirm_prompt(question: &str, retry: bool) -> String {
    if retry {
        format!("{} {} [y/N]: ", "Please answer 'y' or 'n'.".yellow(), question)
    } else {
        format!("{} [y/N]: ", question)
    }
}

/// Replays canned answers for non-interactive drivers. Runs out as "no".
pub struct ScriptedPrompter {
    answers: VecDeque<bool>,
    asked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        ScriptedPrompter {
            answers: answers.into_iter().collect(),
            asked: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared log of every question asked so far.
    pub fn questions(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.asked)
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str) -> VoxResult<bool> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(question.to_string());
        }
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

/// In-memory sink that can be read back after being handed to a `Console`.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        match self.0.lock() {
            Ok(mut buf) => {
                buf.extend_from_slice(data);
                Ok(data.len())
            }
            Err(_) => Err(io::Error::new(io::ErrorKind::Other, "buffer poisoned")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Output and interaction handle threaded through every command.
pub struct Console {
    out: Box<dyn Write>,
    prompter: Box<dyn Prompter>,
    cwd: PathBuf,
}

impl Console {
    pub fn new(out: Box<dyn Write>, prompter: Box<dyn Prompter>, cwd: impl Into<PathBuf>) -> Self {
        Console {
            out,
            prompter,
            cwd: cwd.into(),
        }
    }

    pub fn stdio() -> VoxResult<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(Box::new(io::stdout()), Box::new(TerminalPrompter), cwd))
    }

    /// Directory relative paths and searches are rooted at.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        path_utils::resolve(&self.cwd, path)
    }

    pub fn line(&mut self, text: impl Display) -> VoxResult<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn success(&mut self, text: impl Display) -> VoxResult<()> {
        self.line(text.to_string().green())
    }

    pub fn markdown(&mut self, source: &str) -> VoxResult<()> {
        let rendered = markdown::render(source);
        write!(self.out, "{}", rendered)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn confirm(&mut self, question: &str) -> VoxResult<bool> {
        self.out.flush()?;
        self.prompter.confirm(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompter_records_questions() {
        let mut prompter = ScriptedPrompter::new([true]);
        let asked = prompter.questions();

        assert!(prompter.confirm("first?").unwrap());
        assert!(!prompter.confirm("second?").unwrap());
        assert_eq!(*asked.lock().unwrap(), vec!["first?".to_string(), "second?".to_string()]);
    }

    #[test]
    fn test_console_writes_to_buffer() {
        let buffer = SharedBuffer::new();
        let mut console = Console::new(
            Box::new(buffer.clone()),
            Box::new(ScriptedPrompter::new([])),
            std::env::temp_dir(),
        );

        console.line("plain").unwrap();
        console.success("done").unwrap();
        let out = buffer.contents();
        assert!(out.contains("plain\n"));
        assert!(out.contains("done"));
    }

    #[test]
    fn test_confirm_prompt_carries_retry_hint() {
        assert_eq!(confirm_prompt("Delete it?", false), "Delete it? [y/N]: ");

        let retry = confirm_prompt("Delete it?", true);
        assert!(retry.contains("Please answer 'y' or 'n'."));
        assert!(retry.ends_with("Delete it? [y/N]: "));
    }
}
