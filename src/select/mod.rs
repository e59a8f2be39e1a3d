//! Interactive configuration: two sentinel-terminated selection loops that
//! turn operator input into the selected-species set and the parameter
//! overrides. The loops only see lines, so the same state machines run
//! against the console or a test script.

pub mod parameters;
pub mod species;

pub use parameters::collect_parameter_overrides;
pub use species::select_species;

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input stream closed before the selection finished")]
    Closed,
    #[error("could not read operator input: {0}")]
    Io(#[from] io::Error),
}

/// Where operator lines come from.
pub trait Prompt {
    /// Show `prompt` and return the next line, trimmed. Fails only on
    /// structural I/O problems; those abort the run.
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;
    fn say(&mut self, text: &str);
}

/// One transition of a selection loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Added,
    Rejected,
    Done,
}

/// Console driver: prompts on stdout, lines from stdin.
#[derive(Debug, Default)]
pub struct Console;

impl Prompt for Console {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Scripted driver for tests; answers are consumed in order and running out
/// behaves like a closed stream.
#[derive(Debug, Default)]
pub struct Scripted {
    answers: VecDeque<String>,
}

impl Scripted {
    pub fn new<'a>(answers: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            answers: answers.into_iter().map(str::to_string).collect(),
        }
    }
}

impl Prompt for Scripted {
    fn read_line(&mut self, _prompt: &str) -> Result<String, PromptError> {
        self.answers.pop_front().ok_or(PromptError::Closed)
    }

    fn say(&mut self, _text: &str) {}
}
