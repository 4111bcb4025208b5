//! Paths command handler.
//!
//! Displays the interpreter environment help pages are resolved against.
//! This is the first thing to check when a page that should exist is not
//! found.

use anyhow::Result;
use rhelp_core::HelpOptions;
use rhelp_runtime::{RInterpreter, discover_env};

use crate::error::CliError;

/// Discover and print the environment in `key = value` format.
pub async fn execute(options: &HelpOptions) -> Result<()> {
    let interpreter = RInterpreter::from_options(options);
    let env = discover_env(options, &interpreter)
        .await
        .map_err(CliError::from)?;

    println!("r_path = {}", options.r_path);
    println!("backend = {}", options.backend);
    print!("{env}");
    Ok(())
}
