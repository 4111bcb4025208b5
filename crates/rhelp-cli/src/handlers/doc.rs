//! Doc command handler.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use rhelp_core::{HelpPanel, doc_request_path};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::TerminalView;

/// Show a top-level documentation page such as `index.html`.
pub async fn execute(ctx: &CliContext, page: &str, output: Option<PathBuf>) -> Result<()> {
    let view = Arc::new(TerminalView::new(output));
    let mut panel = HelpPanel::new(ctx.provider(), view);

    let shown = panel
        .show_help(page, Some("doc"))
        .await
        .map_err(CliError::from)?;
    if !shown {
        return Err(CliError::NotFound(doc_request_path(page)).into());
    }
    Ok(())
}
