//! CLI command handlers

pub mod chat;
pub mod stock;
pub mod travel;

use anyhow::{bail, Result};
use std::io::{self, BufRead, Write};

/// Use the flag value, or ask on stdin
pub(crate) fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        bail!("no input provided");
    }
    Ok(line.trim().to_string())
}
