//! User input utilities for interactive command-line prompts.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Prompts the user for a yes/no confirmation.
///
/// Accepts 'y', 'yes', 'n', 'no' and the French 'o', 'oui', 'non'
/// (case insensitive). Empty input is treated as 'no'.
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    confirm_from(&mut stdin.lock(), &mut io::stdout(), prompt)
}

fn prompt_string_from(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> Result<String> {
    write!(output, "{prompt}: ")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read user input")?;
    Ok(line.trim().to_string())
}

fn confirm_from(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> Result<bool> {
    loop {
        let answer = prompt_string_from(input, output, &format!("{prompt} (y/N)"))?;
        match answer.to_lowercase().as_str() {
            "y" | "yes" | "o" | "oui" => return Ok(true),
            // EOF reads as empty
            "n" | "no" | "non" | "" => return Ok(false),
            _ => writeln!(output, "Please enter 'y' for yes or 'n' for no.")?,
        }
    }
}
