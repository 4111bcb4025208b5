//! Domain types for help-file resolution.
//!
//! Pure data and pure functions only; nothing in here touches the
//! filesystem or spawns processes.

mod help_file;
mod history;
mod request_path;

pub use help_file::{FileLocation, HelpFile};
pub use history::{HistoryEntry, NavigationHistory};
pub use request_path::{
    DOC_SEGMENT, HTML_EXTENSION, HTML_SEGMENT, LIBRARY_SEGMENT, RequestPath, RequestShape,
    doc_request_path, function_request_path, normalize_request_path, split_request_path,
};
