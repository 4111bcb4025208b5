//! Terminal presentation of help pages.
//!
//! Format-only: pages arrive fully resolved and link-rewritten from the
//! panel.

mod page_view;

pub use page_view::{TerminalView, help_file_json, page_title, write_page};
