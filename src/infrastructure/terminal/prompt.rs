use console::Term;
use std::io::{self, BufRead};

use crate::common::error::GitOpsError;
use crate::common::result::GitOpsResult;

/// Source of interactive text answers.
pub trait InputPrompt: Send + Sync {
    /// Shows `message` and returns the trimmed answer.
    fn text_input(&self, message: &str) -> GitOpsResult<String>;
}

/// Reads answers from the controlling terminal.
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl ConsolePrompt {
    pub fn new() -> Self {
        Self
    }
}

/// Reads one line from `reader`. End of input yields an empty answer.
fn read_answer(reader: &mut impl BufRead) -> GitOpsResult<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

impl InputPrompt for ConsolePrompt {
    fn text_input(&self, message: &str) -> GitOpsResult<String> {
        let term = Term::stdout();
        term.write_str(&format!("{} ", message))?;

        // Term only reads from a terminal; piped input comes through stdin.
        if term.is_term() {
            Ok(term.read_line()?.trim().to_string())
        } else {
            read_answer(&mut io::stdin().lock())
        }
    }
}

/// Answers every prompt with the same value. Used when input is not interactive.
#[derive(Debug, Clone)]
pub struct FixedPrompt {
    answer: Option<String>,
}

impl FixedPrompt {
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
        }
    }

    /// A prompt that refuses to answer.
    pub fn unanswerable() -> Self {
        Self { answer: None }
    }
}

impl InputPrompt for FixedPrompt {
    fn text_input(&self, message: &str) -> GitOpsResult<String> {
        self.answer.clone().ok_or_else(|| {
            GitOpsError::validation_error("prompt", format!("no answer available for '{}'", message), None)
        })
    }
}
