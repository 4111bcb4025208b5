//! Path command handler.
//!
//! Resolves a raw request path, the way a clicked link would be.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use rhelp_core::HelpPanel;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{TerminalView, help_file_json};

pub async fn execute(
    ctx: &CliContext,
    request_path: &str,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    if json {
        let file = ctx
            .provider
            .get_help_file_from_request_path(request_path, None)
            .await
            .map_err(CliError::from)?
            .ok_or_else(|| CliError::NotFound(request_path.to_string()))?;

        let rendered = help_file_json(&file).context("Failed to serialize help file")?;
        match output {
            Some(path) => std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => println!("{rendered}"),
        }
        return Ok(());
    }

    let view = Arc::new(TerminalView::new(output));
    let mut panel = HelpPanel::new(ctx.provider(), view);
    let shown = panel
        .show_help_for_path(request_path)
        .await
        .map_err(CliError::from)?;
    if !shown {
        return Err(CliError::NotFound(request_path.to_string()).into());
    }
    Ok(())
}
