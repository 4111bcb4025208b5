//! Resolution results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::request_path::{HTML_EXTENSION, RequestPath, split_request_path};

/// A found or hypothesized storage location for a help page.
///
/// Not guaranteed to exist on disk: the same type records confirmed hits and
/// serves as the "last known root" hint for the next relative lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLocation {
    /// Root the file was found under (interpreter home or a library root).
    pub trunc_path: PathBuf,
    /// Directory of the file relative to `trunc_path`.
    pub rel_path: String,
    /// File name without any directory part.
    pub file_name: String,
}

impl FileLocation {
    pub fn new(
        trunc_path: impl Into<PathBuf>,
        rel_path: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            trunc_path: trunc_path.into(),
            rel_path: rel_path.into(),
            file_name: file_name.into(),
        }
    }

    /// Absolute path of the location on disk.
    pub fn full_path(&self) -> PathBuf {
        let mut path = self.trunc_path.clone();
        for segment in self.rel_path.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(&self.file_name);
        path
    }
}

/// Normalized result of resolving a request path.
///
/// Constructed once per resolution and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpFile {
    /// Page content.
    pub html: String,
    /// Path as used by the help server.
    pub request_path: String,
    /// File name as used by the help server.
    pub request_filename: String,
    /// Directory as used by the help server.
    pub request_dirname: String,
    /// Where the content came from, if known.
    pub file_location: Option<FileLocation>,
    /// `true` when `html` was read verbatim from a pre-rendered file.
    pub is_real_file: bool,
}

impl HelpFile {
    /// Content read from a pre-rendered file.
    pub fn from_real_file(request_path: &str, html: String, location: FileLocation) -> Self {
        Self::build(request_path, html, Some(location), true)
    }

    /// Content produced by extraction or fetched from a help server.
    pub fn generated(request_path: &str, html: String, location: Option<FileLocation>) -> Self {
        Self::build(request_path, html, location, false)
    }

    fn build(
        request_path: &str,
        html: String,
        file_location: Option<FileLocation>,
        is_real_file: bool,
    ) -> Self {
        let RequestPath {
            request_path,
            request_filename,
            request_dirname,
        } = split_request_path(request_path);

        Self {
            html,
            request_path,
            request_filename,
            request_dirname,
            file_location,
            is_real_file,
        }
    }

    /// Topic or page name, i.e. the file name without `.html`.
    pub fn topic_name(&self) -> &str {
        self.request_filename
            .strip_suffix(HTML_EXTENSION)
            .unwrap_or(&self.request_filename)
    }
}
