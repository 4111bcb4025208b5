//! Interpreter port.
//!
//! This port abstracts every call into the external R interpreter. The
//! runtime crate implements it with subprocesses; tests substitute mocks.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from interpreter invocations.
#[derive(Debug, Error)]
pub enum InterpreterError {
    /// The interpreter executable could not be started.
    #[error("Failed to spawn {command}: {reason}")]
    Spawn { command: String, reason: String },

    /// The interpreter ran but reported failure.
    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The interpreter did not finish in time and was killed.
    #[error("{command} timed out after {seconds}s")]
    Timeout { command: String, seconds: u64 },

    /// Reading or writing a handoff file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Calls into the external interpreter.
///
/// Every method blocks the calling flow until the interpreter returns.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait InterpreterPort: Send + Sync {
    /// The installation home (`R.home()`).
    async fn home_path(&self) -> Result<PathBuf, InterpreterError>;

    /// Library search roots in priority order (`.libPaths()`).
    async fn lib_paths(&self) -> Result<Vec<PathBuf>, InterpreterError>;

    /// Raw Rd markup for one topic of a package's compressed help archive.
    ///
    /// Runs with `help_dir` as working directory; that directory holds the
    /// `<package>.rdb`/`<package>.rdx` pair.
    async fn topic_markup(
        &self,
        help_dir: &Path,
        package: &str,
        topic: &str,
    ) -> Result<String, InterpreterError>;

    /// Convert an Rd file to HTML.
    async fn rd_to_html(&self, help_dir: &Path, rd_file: &Path)
    -> Result<String, InterpreterError>;
}
