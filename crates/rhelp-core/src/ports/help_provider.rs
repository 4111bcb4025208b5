//! Help provider capability.
//!
//! Both backends (local extraction and the remote help-server proxy)
//! implement this one trait. The backend is chosen when the provider is
//! built and injected into the panel; nothing downstream knows which one
//! it talks to.

use async_trait::async_trait;

use super::HelpError;
use crate::config::BackendKind;
use crate::domain::{FileLocation, HelpFile, doc_request_path, function_request_path};

/// Resolves request paths to help pages.
#[async_trait]
pub trait HelpProvider: Send + Sync {
    /// Which backend this is.
    fn backend(&self) -> BackendKind;

    /// Resolve a request path.
    ///
    /// `prev_location` is where the currently shown page came from; relative
    /// links are tried against its root first. Returns `Ok(None)` when no
    /// page exists for the path.
    async fn get_help_file_from_request_path(
        &self,
        request_path: &str,
        prev_location: Option<&FileLocation>,
    ) -> Result<Option<HelpFile>, HelpError>;

    /// Documentation of `function` in `package`.
    async fn get_help_file_for_function(
        &self,
        package: &str,
        function: &str,
    ) -> Result<Option<HelpFile>, HelpError> {
        let request_path = function_request_path(package, function);
        self.get_help_file_from_request_path(&request_path, None)
            .await
    }

    /// A top-level documentation page such as `index.html`.
    async fn get_help_file_for_doc(&self, page: &str) -> Result<Option<HelpFile>, HelpError> {
        let request_path = doc_request_path(page);
        self.get_help_file_from_request_path(&request_path, None)
            .await
    }

    /// Release subprocesses and temporary state. Safe to call repeatedly.
    async fn dispose(&self);
}
