//! Logical request paths as used by R's help server.
//!
//! A request path is a slash-delimited address such as
//! `library/utils/html/help.html` or `doc/html/index.html`. It says nothing
//! about where the content is physically stored.

use serde::{Deserialize, Serialize};

/// Segment that prefixes package documentation paths.
pub const LIBRARY_SEGMENT: &str = "library";

/// Segment that prefixes top-level documentation pages.
pub const DOC_SEGMENT: &str = "doc";

/// Directory inside a package (or `doc/`) holding rendered pages.
pub const HTML_SEGMENT: &str = "html";

/// File extension of rendered help pages.
pub const HTML_EXTENSION: &str = ".html";

/// A request path decomposed into its directory and file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPath {
    /// Full path with `/` separators.
    pub request_path: String,
    /// Last path segment.
    pub request_filename: String,
    /// All preceding segments joined with `/` (empty if there are none).
    pub request_dirname: String,
}

impl RequestPath {
    /// Rebuild the path from its directory and file name.
    pub fn join(&self) -> String {
        if self.request_dirname.is_empty() {
            self.request_filename.clone()
        } else {
            format!("{}/{}", self.request_dirname, self.request_filename)
        }
    }
}

/// Split a request path into directory and file name.
///
/// Backslashes are treated as separators. A path without any separator has
/// an empty directory.
pub fn split_request_path(request_path: &str) -> RequestPath {
    let request_path = request_path.replace('\\', "/");
    let (request_dirname, request_filename) = match request_path.rsplit_once('/') {
        Some((dir, file)) => (dir.to_string(), file.to_string()),
        None => (String::new(), request_path.clone()),
    };

    RequestPath {
        request_path,
        request_filename,
        request_dirname,
    }
}

/// Lexically normalize a request path.
///
/// Converts separators, drops empty and `.` segments and folds `..` into its
/// parent. `..` never climbs above the logical root, so the result is always
/// a relative path below it.
pub fn normalize_request_path(request_path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let unified = request_path.replace('\\', "/");

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// The recognized request path shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestShape {
    /// `library/<package>/html/<topic>.html`
    Topic { package: String, topic: String },
    /// `doc/html/<page>`
    Doc { page: String },
    /// Anything else. Only resolvable as a literal file.
    Other,
}

impl RequestShape {
    /// Classify a request path.
    ///
    /// Leading slashes are ignored; apart from that the path must match one
    /// of the shapes exactly.
    pub fn parse(request_path: &str) -> Self {
        let trimmed = request_path.trim_start_matches('/');
        let parts: Vec<&str> = trimmed.split('/').collect();

        match parts.as_slice() {
            [LIBRARY_SEGMENT, package, HTML_SEGMENT, file] if !package.is_empty() => file
                .strip_suffix(HTML_EXTENSION)
                .filter(|topic| !topic.is_empty())
                .map_or(Self::Other, |topic| Self::Topic {
                    package: (*package).to_string(),
                    topic: topic.to_string(),
                }),
            [DOC_SEGMENT, HTML_SEGMENT, page] if !page.is_empty() => Self::Doc {
                page: (*page).to_string(),
            },
            _ => Self::Other,
        }
    }
}

/// Canonical request path for a function's documentation.
pub fn function_request_path(package: &str, function: &str) -> String {
    format!("{LIBRARY_SEGMENT}/{package}/{HTML_SEGMENT}/{function}{HTML_EXTENSION}")
}

/// Canonical request path for a top-level documentation page.
pub fn doc_request_path(page: &str) -> String {
    format!("{DOC_SEGMENT}/{HTML_SEGMENT}/{page}")
}
