//! Local help provider: pre-rendered files first, archive extraction second.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rhelp_core::config::BackendKind;
use rhelp_core::domain::HTML_SEGMENT;
use rhelp_core::{
    FileLocation, HelpError, HelpFile, HelpProvider, InterpreterEnv, InterpreterPort,
    RequestShape, archive_locations, normalize_request_path, resolve_real,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::extract::ArchiveExtractor;

/// Prefix of per-provider temporary directories.
pub const TEMP_DIR_PREFIX: &str = "rhelp-";

/// Serves help pages straight from the interpreter's installation.
pub struct LocalHelpProvider {
    env: Arc<InterpreterEnv>,
    extractor: ArchiveExtractor,
    temp_dir: PathBuf,
    disposed: AtomicBool,
}

impl LocalHelpProvider {
    /// Create a provider with its temp directory under the OS temp dir.
    pub async fn new(
        env: InterpreterEnv,
        interpreter: Arc<dyn InterpreterPort>,
    ) -> Result<Self, HelpError> {
        Self::new_in(env, interpreter, &std::env::temp_dir()).await
    }

    /// Create a provider with its temp directory under `parent`.
    pub async fn new_in(
        env: InterpreterEnv,
        interpreter: Arc<dyn InterpreterPort>,
        parent: &Path,
    ) -> Result<Self, HelpError> {
        let temp_dir = parent.join(format!("{TEMP_DIR_PREFIX}{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&temp_dir)
            .await
            .map_err(|e| HelpError::io(&temp_dir, e))?;
        debug!(path = %temp_dir.display(), "Created provider temp directory");

        Ok(Self {
            env: Arc::new(env),
            extractor: ArchiveExtractor::new(interpreter, temp_dir.clone()),
            temp_dir,
            disposed: AtomicBool::new(false),
        })
    }

    pub fn env(&self) -> &InterpreterEnv {
        &self.env
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Look for a pre-rendered file off the async workers; the resolver
    /// probes and reads with blocking filesystem calls.
    async fn resolve_real_file(
        &self,
        request_path: &str,
        prev_location: Option<&FileLocation>,
    ) -> Result<Option<HelpFile>, HelpError> {
        let env = Arc::clone(&self.env);
        let path = request_path.to_string();
        let prev = prev_location.cloned();

        tokio::task::spawn_blocking(move || resolve_real(&env, &path, prev.as_ref()))
            .await
            .map_err(|e| HelpError::io(request_path, io::Error::other(e)))
    }

    async fn extract_topic(
        &self,
        request_path: &str,
        package: &str,
        topic: &str,
    ) -> Option<HelpFile> {
        let env = Arc::clone(&self.env);
        let owned_package = package.to_string();
        let lookup = tokio::task::spawn_blocking(move || archive_locations(&env, &owned_package));
        let archives = match lookup.await {
            Ok(archives) => archives,
            Err(e) => {
                warn!(package, error = %e, "Archive lookup task failed");
                return None;
            }
        };

        for archive in archives {
            debug!(
                package,
                topic,
                help_dir = %archive.help_dir.display(),
                "Trying help archive"
            );
            if let Some(html) = self.extractor.extract(&archive.help_dir, package, topic).await {
                let location = FileLocation::new(
                    archive.lib_path,
                    format!("{package}/{HTML_SEGMENT}"),
                    format!("{topic}.html"),
                );
                return Some(HelpFile::generated(request_path, html, Some(location)));
            }
        }
        None
    }
}

#[async_trait]
impl HelpProvider for LocalHelpProvider {
    fn backend(&self) -> BackendKind {
        BackendKind::Local
    }

    async fn get_help_file_from_request_path(
        &self,
        request_path: &str,
        prev_location: Option<&FileLocation>,
    ) -> Result<Option<HelpFile>, HelpError> {
        if self.is_disposed() {
            return Err(HelpError::Disposed);
        }

        let request_path = normalize_request_path(request_path);
        if let Some(file) = self.resolve_real_file(&request_path, prev_location).await? {
            return Ok(Some(file));
        }

        match RequestShape::parse(&request_path) {
            RequestShape::Topic { package, topic } => {
                Ok(self.extract_topic(&request_path, &package, &topic).await)
            }
            _ => {
                debug!(request_path = %request_path, "No file and not a topic path");
                Ok(None)
            }
        }
    }

    async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        match tokio::fs::remove_dir_all(&self.temp_dir).await {
            Ok(()) => info!(path = %self.temp_dir.display(), "Removed provider temp directory"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.temp_dir.display(),
                error = %e,
                "Failed to remove provider temp directory"
            ),
        }
    }
}

impl Drop for LocalHelpProvider {
    fn drop(&mut self) {
        if !self.is_disposed() {
            let _ = std::fs::remove_dir_all(&self.temp_dir);
        }
    }
}
