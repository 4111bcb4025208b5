//! User input utilities for interactive command-line prompts.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Prompt for one line. Returns `None` at end of input.
///
/// The returned line is trimmed.
pub fn prompt_line(prompt: &str) -> Result<Option<String>> {
    eprint!("{prompt}");
    io::stderr().flush().ok();
    read_trimmed_line(&mut io::stdin().lock())
}

/// Prompts the user for a string input with a default value.
///
/// If the user just presses Enter (or input ends), the default is
/// returned.
pub fn prompt_string_with_default(prompt: &str, default: Option<&str>) -> Result<String> {
    if let Some(default_val) = default {
        eprint!("{prompt} [{default_val}]: ");
    } else {
        eprint!("{prompt}: ");
    }
    io::stderr().flush().ok();

    let line = read_trimmed_line(&mut io::stdin().lock())?.unwrap_or_default();
    Ok(with_default(line, default))
}

fn read_trimmed_line(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut input = String::new();
    let read = reader
        .read_line(&mut input)
        .context("Failed to read user input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn with_default(input: String, default: Option<&str>) -> String {
    match default {
        Some(default_val) if input.is_empty() => default_val.to_string(),
        _ => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_trimmed_line() {
        let mut input: &[u8] = b"  stats \nnext\n";
        assert_eq!(read_trimmed_line(&mut input).unwrap().as_deref(), Some("stats"));
        assert_eq!(read_trimmed_line(&mut input).unwrap().as_deref(), Some("next"));
        assert_eq!(read_trimmed_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_default_applies_to_empty_input() {
        assert_eq!(with_default(String::new(), Some("utils")), "utils");
        assert_eq!(with_default("stats".to_string(), Some("utils")), "stats");
        assert_eq!(with_default(String::new(), None), "");
    }
}
