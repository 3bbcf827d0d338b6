//! Console abstraction for prompting and coloured output.
//!
//! The quiz loop, the reporter and the overwrite confirmation all talk to the
//! user through [`Console`], so they can be driven by a script in tests.

use std::collections::VecDeque;
use std::io;

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Neutral text (blue).
    Info,
    /// A correct answer or completed action (green).
    Success,
    /// A wrong answer or error (red).
    Failure,
    /// Warnings and dates (yellow).
    Notice,
    /// Summaries and file actions (cyan).
    Accent,
}

/// A line-oriented terminal.
pub trait Console {
    /// Print a message followed by a line break.
    fn say(&mut self, text: &str, tone: Tone);

    /// Show `prompt` and block until a line is entered.
    ///
    /// The returned line has its line terminator stripped. End of input is an
    /// `UnexpectedEof` error.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// A console fed from a fixed script, recording everything it is told.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    fallback: Option<String>,
    output: Vec<(Tone, String)>,
    prompts: usize,
}

impl ScriptedConsole {
    /// A console that answers prompts with `inputs`, in order.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// A console that answers every prompt with the same line.
    pub fn repeating(input: impl Into<String>) -> Self {
        Self {
            fallback: Some(input.into()),
            ..Self::default()
        }
    }

    /// Everything printed so far, in order.
    pub fn output(&self) -> &[(Tone, String)] {
        &self.output
    }

    /// All printed text joined with newlines.
    pub fn transcript(&self) -> String {
        self.output
            .iter()
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of prompts answered.
    pub fn prompts(&self) -> usize {
        self.prompts
    }

    /// Inputs that were never consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, text: &str, tone: Tone) {
        self.output.push((tone, text.to_string()));
    }

    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        let line = match self.inputs.pop_front() {
            Some(line) => line,
            None => self.fallback.clone().ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted")
            })?,
        };
        self.prompts += 1;
        Ok(line)
    }
}
