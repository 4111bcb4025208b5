//! Command handlers.
//!
//! Each handler receives the composed context (or, for `paths`, only the
//! options) and reports misses as `CliError::NotFound`.

pub mod browse;
pub mod doc;
pub mod path;
pub mod paths;
pub mod show;
