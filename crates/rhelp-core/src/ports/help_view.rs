//! View port for the help panel.
//!
//! The panel hands finished pages to a view; the view decides how to show
//! them (webview, terminal, file). Implementations live in adapters.

use serde::Serialize;

/// A page ready to be shown, with links already rewritten.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    /// HTML after link rewriting.
    pub html: String,
    /// Request path the page was resolved from.
    pub request_path: String,
    /// Package the page belongs to.
    pub pkg_name: String,
    /// Topic shown.
    pub fnc_name: String,
    /// Scroll offset to restore (non-zero when replaying history).
    pub scroll_status: f64,
    /// Whether the content came from a pre-rendered file.
    pub is_real_file: bool,
}

/// Sink for rendered pages.
pub trait HelpView: Send + Sync {
    /// Show a page.
    fn render(&self, page: &RenderedPage);

    /// Tell the user that nothing was found for `request`.
    fn not_found(&self, request: &str);
}

/// A view that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopView;

impl HelpView for NoopView {
    fn render(&self, _page: &RenderedPage) {}

    fn not_found(&self, _request: &str) {}
}
