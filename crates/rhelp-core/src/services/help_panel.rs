//! History-aware help panel.
//!
//! The panel is the single navigation flow: it asks the provider for pages,
//! rewrites their links, pushes them to the view and keeps back/forward
//! history. All mutation goes through `&mut self`.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{DOC_SEGMENT, HelpFile, HistoryEntry, NavigationHistory, RequestShape};
use crate::links::{LinkTarget, classify_link, extract_links, rewrite_relative_links};
use crate::ports::{HelpError, HelpProvider, HelpView, RenderedPage};

/// Errors from panel operations.
#[derive(Debug, Error)]
pub enum PanelError {
    /// No package was given and no page is shown to borrow one from.
    #[error("No package name specified or stored for '{function}'")]
    NoPackage { function: String },

    /// The provider failed.
    #[error(transparent)]
    Provider(#[from] HelpError),
}

/// Back/forward buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    Back,
    Forward,
    /// Any other mouse button; ignored.
    Other(u8),
}

impl NavButton {
    /// Map a mouse button number (3 = back, 4 = forward).
    pub const fn from_mouse_button(button: u8) -> Self {
        match button {
            3 => Self::Back,
            4 => Self::Forward,
            other => Self::Other(other),
        }
    }
}

/// Messages a view sends back to the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelMessage {
    LinkClicked { href: String },
    NavigationButton { button: NavButton },
    Scrolled { offset: f64 },
    Text { text: String },
}

/// Help panel controller.
pub struct HelpPanel {
    provider: Arc<dyn HelpProvider>,
    view: Arc<dyn HelpView>,
    history: NavigationHistory,
}

impl HelpPanel {
    pub fn new(provider: Arc<dyn HelpProvider>, view: Arc<dyn HelpView>) -> Self {
        Self {
            provider,
            view,
            history: NavigationHistory::new(),
        }
    }

    pub const fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub const fn current(&self) -> Option<&HistoryEntry> {
        self.history.current()
    }

    /// Show documentation for `function`.
    ///
    /// `package` defaults to the package of the current page. The pseudo
    /// package `doc` addresses top-level documentation pages. Returns
    /// whether a page was shown.
    pub async fn show_help(
        &mut self,
        function: &str,
        package: Option<&str>,
    ) -> Result<bool, PanelError> {
        let package = match package.filter(|p| !p.is_empty()) {
            Some(package) => package.to_string(),
            None => self
                .current()
                .map(|entry| entry.pkg_name.clone())
                .filter(|p| !p.is_empty())
                .ok_or_else(|| PanelError::NoPackage {
                    function: function.to_string(),
                })?,
        };

        let help_file = if package == DOC_SEGMENT {
            self.provider.get_help_file_for_doc(function).await?
        } else {
            let function = topic_file_name(function);
            self.provider
                .get_help_file_for_function(&package, &function)
                .await?
        };

        match help_file {
            Some(help_file) => {
                self.navigate(help_file, &package, true);
                Ok(true)
            }
            None => {
                info!(package = %package, function, "No help page found");
                self.view.not_found(&format!("{package}::{function}"));
                Ok(false)
            }
        }
    }

    /// Resolve a raw request path relative to the current page.
    pub async fn show_help_for_path(&mut self, request_path: &str) -> Result<bool, PanelError> {
        let prev_location = self
            .current()
            .and_then(|entry| entry.help_file.file_location.clone());

        let help_file = self
            .provider
            .get_help_file_from_request_path(request_path, prev_location.as_ref())
            .await?;

        match help_file {
            Some(help_file) => {
                let package = self.package_for(&help_file.request_path);
                self.navigate(help_file, &package, true);
                Ok(true)
            }
            None => {
                warn!(request_path, "Could not handle path");
                self.view.not_found(request_path);
                Ok(false)
            }
        }
    }

    /// Render `help_file` and make it the current page.
    pub fn navigate(&mut self, help_file: HelpFile, package: &str, update_history: bool) {
        let entry = HistoryEntry::new(package, help_file);
        self.render_entry(&entry);

        if update_history {
            self.history.visit(entry);
        } else {
            self.history.replace_current(entry);
        }
    }

    /// Replay the previous page. Returns `false` if there is none.
    pub fn go_back(&mut self) -> bool {
        match self.history.go_back() {
            Some(entry) => {
                self.render_entry(&entry);
                true
            }
            None => false,
        }
    }

    /// Replay the next page. Returns `false` if there is none.
    pub fn go_forward(&mut self) -> bool {
        match self.history.go_forward() {
            Some(entry) => {
                self.render_entry(&entry);
                true
            }
            None => false,
        }
    }

    /// React to a message from the view. Returns whether the shown page
    /// changed.
    pub async fn handle_message(&mut self, message: PanelMessage) -> Result<bool, PanelError> {
        match message {
            PanelMessage::LinkClicked { href } => {
                debug!(href = %href, "Link clicked");
                match classify_link(&href) {
                    LinkTarget::Path(path) if !path.is_empty() => {
                        self.show_help_for_path(&path).await
                    }
                    LinkTarget::Path(_) | LinkTarget::Fragment(_) => Ok(false),
                    LinkTarget::External(url) => {
                        info!(url = %url, "Ignoring link outside the help system");
                        Ok(false)
                    }
                }
            }
            PanelMessage::NavigationButton { button } => Ok(match button {
                NavButton::Back => self.go_back(),
                NavButton::Forward => self.go_forward(),
                NavButton::Other(_) => false,
            }),
            PanelMessage::Scrolled { offset } => {
                if let Some(entry) = self.history.current_mut() {
                    entry.scroll_status = offset;
                }
                Ok(false)
            }
            PanelMessage::Text { text } => {
                info!(text = %text, "Message from help view");
                Ok(false)
            }
        }
    }

    /// Links on the current page, already rewritten to request paths.
    pub fn current_links(&self) -> Vec<String> {
        self.current()
            .map(|entry| {
                let html = rewrite_relative_links(
                    &entry.help_file.html,
                    &entry.help_file.request_dirname,
                );
                extract_links(&html)
            })
            .unwrap_or_default()
    }

    /// Dispose the underlying provider.
    pub async fn dispose(&self) {
        self.provider.dispose().await;
    }

    fn render_entry(&self, entry: &HistoryEntry) {
        let help_file = &entry.help_file;
        let page = RenderedPage {
            html: rewrite_relative_links(&help_file.html, &help_file.request_dirname),
            request_path: help_file.request_path.clone(),
            pkg_name: entry.pkg_name.clone(),
            fnc_name: entry.fnc_name.clone(),
            scroll_status: entry.scroll_status,
            is_real_file: help_file.is_real_file,
        };
        self.view.render(&page);
    }

    fn package_for(&self, request_path: &str) -> String {
        match RequestShape::parse(request_path) {
            RequestShape::Topic { package, .. } => package,
            RequestShape::Doc { .. } => DOC_SEGMENT.to_string(),
            RequestShape::Other => self
                .current()
                .map(|entry| entry.pkg_name.clone())
                .unwrap_or_default(),
        }
    }
}

/// Help file name for a topic; a leading `.` is stored as `dot-`.
fn topic_file_name(function: &str) -> String {
    function
        .strip_prefix('.')
        .map_or_else(|| function.to_string(), |rest| format!("dot-{rest}"))
}
