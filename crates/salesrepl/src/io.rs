//! Line input and output used by the session.
//!
//! The session never touches the terminal directly: commands and interactive
//! sale fields come from a [`LineInput`], results go to a [`LineOutput`].

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;
use thiserror::Error;

/// Error returned when no line could be read.
#[derive(Debug, Error)]
pub enum InputError {
    /// The user pressed Ctrl-C.
    #[error("interrupted")]
    Interrupted,
    /// The input is exhausted (Ctrl-D, end of script).
    #[error("end of input")]
    Eof,
    /// Any other terminal failure.
    #[error("failed to read input: {0}")]
    Io(String),
}

impl From<ReadlineError> for InputError {
    fn from(err: ReadlineError) -> Self {
        match err {
            ReadlineError::Interrupted => Self::Interrupted,
            ReadlineError::Eof => Self::Eof,
            other => Self::Io(other.to_string()),
        }
    }
}

/// A source of text lines.
pub trait LineInput {
    /// Show `prompt` and block until a line is available.
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError>;

    /// Remember a command line for recall. Inputs without history ignore it.
    fn add_history(&mut self, _line: &str) {}
}

impl LineInput for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        Ok(self.readline(prompt)?)
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.add_history_entry(line);
    }
}

/// Lines supplied up front, e.g. from a script file or a test.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    /// Create an input that yields `lines` in order, then [`InputError::Eof`].
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether every line has been consumed.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl LineInput for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Result<String, InputError> {
        self.lines.pop_front().ok_or(InputError::Eof)
    }
}

/// A sink for lines of text.
pub trait LineOutput {
    /// Write one line.
    fn write_line(&mut self, line: &str);
}

/// Writes to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutLineWriter;

impl LineOutput for StdoutLineWriter {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Collects lines in memory.
impl LineOutput for Vec<String> {
    fn write_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}
