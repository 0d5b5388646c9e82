//! Operator interaction
//!
//! Confirmations and free-text input go through the [`Prompt`] trait so the
//! same workflows run against a terminal or a scripted operator.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::common::Result;

/// Questions the runner may ask the operator
pub trait Prompt {
    /// Ask a yes/no question
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Read free text until the end-of-input signal
    fn read_text(&mut self, header: &str) -> Result<String>;
}

/// Prompt backed by a reader/writer pair, normally the process stdin/stdout
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process stdin/stdout
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), assume_yes)
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        if self.assume_yes {
            writeln!(self.output, "{} [y/n] y", question)?;
            return Ok(true);
        }

        loop {
            write!(self.output, "{} [y/n] ", question)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                // End of input counts as a refusal
                writeln!(self.output)?;
                return Ok(false);
            }

            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                other => writeln!(self.output, "Unrecognized answer '{}', type 'y' or 'n'", other)?,
            }
        }
    }

    fn read_text(&mut self, header: &str) -> Result<String> {
        writeln!(self.output, "{} (end with Ctrl-D)", header)?;
        self.output.flush()?;

        let mut text = String::new();
        self.input.read_to_string(&mut text)?;
        Ok(text)
    }
}

/// Prompt that replays prepared answers, for unattended runs
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    texts: VecDeque<String>,
    /// Every question asked so far, in order
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, yes: bool) -> Self {
        self.answers.push_back(yes);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.texts.push_back(text.into());
        self
    }
}

impl Prompt for ScriptedPrompt {
    /// Unscripted questions are answered "no"
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }

    fn read_text(&mut self, header: &str) -> Result<String> {
        self.asked.push(header.to_string());
        Ok(self.texts.pop_front().unwrap_or_default())
    }
}
