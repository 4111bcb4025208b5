//! Back/forward navigation history.

use serde::{Deserialize, Serialize};

use super::help_file::HelpFile;

/// One visited page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Package the page belongs to (`doc` for top-level pages).
    pub pkg_name: String,
    /// Topic shown on the page.
    pub fnc_name: String,
    /// The resolved page, stored by value.
    pub help_file: HelpFile,
    /// Vertical scroll offset reported by the view.
    pub scroll_status: f64,
}

impl HistoryEntry {
    pub fn new(pkg_name: impl Into<String>, help_file: HelpFile) -> Self {
        let fnc_name = help_file.topic_name().to_string();
        Self {
            pkg_name: pkg_name.into(),
            fnc_name,
            help_file,
            scroll_status: 0.0,
        }
    }
}

/// Current page plus back and forward stacks (most recent last).
///
/// Entries are owned values; moving an entry between stacks never shares
/// it with the other stack.
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    current: Option<HistoryEntry>,
    back: Vec<HistoryEntry>,
    forward: Vec<HistoryEntry>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn current(&self) -> Option<&HistoryEntry> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut HistoryEntry> {
        self.current.as_mut()
    }

    pub fn back_len(&self) -> usize {
        self.back.len()
    }

    pub fn forward_len(&self) -> usize {
        self.forward.len()
    }

    /// Record a fresh navigation.
    ///
    /// The previous entry moves onto the back stack and forward history is
    /// invalidated.
    pub fn visit(&mut self, entry: HistoryEntry) {
        if let Some(previous) = self.current.take() {
            self.back.push(previous);
        }
        self.forward.clear();
        self.current = Some(entry);
    }

    /// Replace the current entry without touching either stack.
    pub fn replace_current(&mut self, entry: HistoryEntry) {
        self.current = Some(entry);
    }

    /// Step back. Returns the entry to replay, or `None` if there is none.
    pub fn go_back(&mut self) -> Option<HistoryEntry> {
        let entry = self.back.pop()?;
        if let Some(current) = self.current.take() {
            self.forward.push(current);
        }
        self.current = Some(entry.clone());
        Some(entry)
    }

    /// Step forward. Returns the entry to replay, or `None` if there is none.
    pub fn go_forward(&mut self) -> Option<HistoryEntry> {
        let entry = self.forward.pop()?;
        if let Some(current) = self.current.take() {
            self.back.push(current);
        }
        self.current = Some(entry.clone());
        Some(entry)
    }
}
