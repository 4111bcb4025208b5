//! Show command handler.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use rhelp_core::HelpPanel;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::TerminalView;

/// Show the documentation of `topic` in `package`.
pub async fn execute(
    ctx: &CliContext,
    package: &str,
    topic: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let view = Arc::new(TerminalView::new(output));
    let mut panel = HelpPanel::new(ctx.provider(), view);

    let shown = panel
        .show_help(topic, Some(package))
        .await
        .map_err(CliError::from)?;
    if !shown {
        return Err(CliError::NotFound(format!("{package}::{topic}")).into());
    }
    Ok(())
}
