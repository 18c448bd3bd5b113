//! Interactive question loop
//!
//! `AwaitingInput -> Processing -> AwaitingInput` until an exit command or
//! end of input. Blank lines re-prompt without touching the providers.

use super::QaEngine;
use crate::error::Result;
use std::io::{BufRead, Write};

pub const QUESTION_PROMPT: &str = "Ask me anything about your document (or type 'exit'): ";
pub const FAREWELL: &str = "Goodbye!";

/// What a line of user input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Empty,
    Ask(String),
}

/// Classify one line of input
pub fn classify_input(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Command::Empty
    } else if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        Command::Exit
    } else {
        Command::Ask(trimmed.to_string())
    }
}

/// Session counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub answered: usize,
    pub failed: usize,
}

/// Run the read-answer loop until exit or end of input
///
/// Per-question failures are printed and the loop carries on; only I/O
/// errors on `input`/`output` end the session early.
pub async fn run_session<R, W>(engine: &QaEngine, mut input: R, mut output: W) -> Result<SessionStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = SessionStats::default();
    let mut line = String::new();

    loop {
        write!(output, "\n{}", QUESTION_PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            writeln!(output, "{}", FAREWELL)?;
            break;
        }

        let question = match classify_input(&line) {
            Command::Exit => {
                writeln!(output, "{}", FAREWELL)?;
                break;
            }
            Command::Empty => continue,
            Command::Ask(question) => question,
        };

        match engine.ask(&question).await {
            Ok(exchange) => {
                writeln!(output, "\nAnswer:\n{}", exchange.answer)?;
                stats.answered += 1;
            }
            Err(e) => {
                tracing::warn!("Question failed: {}", e);
                writeln!(output, "\nError: {}", e)?;
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_commands() {
        assert_eq!(classify_input("exit"), Command::Exit);
        assert_eq!(classify_input("QUIT"), Command::Exit);
        assert_eq!(classify_input("  exit  \n"), Command::Exit);
        assert_eq!(classify_input("Exit"), Command::Exit);
    }

    #[test]
    fn test_questions_and_blanks() {
        assert_eq!(classify_input("hello"), Command::Ask("hello".to_string()));
        assert_eq!(
            classify_input("  exit strategy?  "),
            Command::Ask("exit strategy?".to_string())
        );
        assert_eq!(classify_input("   \n"), Command::Empty);
        assert_eq!(classify_input(""), Command::Empty);
    }
}
