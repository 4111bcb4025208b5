//! `HelpView` for the terminal: HTML to stdout or a file, status to stderr.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rhelp_core::{HelpFile, HelpView, RenderedPage};
use tracing::warn;

/// Writes every rendered page to stdout, or overwrites `output` with it.
///
/// One-shot commands report misses through their exit status; only the
/// interactive view prints them.
#[derive(Debug, Clone, Default)]
pub struct TerminalView {
    output: Option<PathBuf>,
    interactive: bool,
}

impl TerminalView {
    pub const fn new(output: Option<PathBuf>) -> Self {
        Self {
            output,
            interactive: false,
        }
    }

    pub const fn interactive(output: Option<PathBuf>) -> Self {
        Self {
            output,
            interactive: true,
        }
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

impl HelpView for TerminalView {
    fn render(&self, page: &RenderedPage) {
        eprintln!("{}", page_title(page));
        if let Err(e) = write_page(page, self.output()) {
            warn!(error = %e, "Failed to write help page");
            eprintln!("Failed to write help page: {e}");
        }
    }

    fn not_found(&self, request: &str) {
        if self.interactive {
            eprintln!("No help found for {request}");
        }
    }
}

/// One-line description of a page.
pub fn page_title(page: &RenderedPage) -> String {
    let source = if page.is_real_file { "file" } else { "generated" };
    format!(
        "== {}::{} ({}) [{source}] ==",
        page.pkg_name, page.fnc_name, page.request_path
    )
}

/// Write the page HTML to `output`, or to stdout when `None`.
pub fn write_page(page: &RenderedPage, output: Option<&Path>) -> io::Result<()> {
    match output {
        Some(path) => std::fs::write(path, &page.html),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(page.html.as_bytes())?;
            if !page.html.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()
        }
    }
}

/// Pretty JSON for a resolved help file.
pub fn help_file_json(file: &HelpFile) -> serde_json::Result<String> {
    serde_json::to_string_pretty(file)
}
