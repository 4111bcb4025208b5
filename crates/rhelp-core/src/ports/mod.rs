//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `tokio::process` types in any signature
//! - Recoverable misses are `Ok(None)`, never an error variant
//! - Intent-based methods for the interpreter (not command lines)

pub mod help_provider;
pub mod help_view;
pub mod interpreter;

use std::path::PathBuf;
use thiserror::Error;

pub use help_provider::HelpProvider;
pub use help_view::{HelpView, NoopView, RenderedPage};
pub use interpreter::{InterpreterError, InterpreterPort};

#[cfg(any(test, feature = "test-utils"))]
pub use interpreter::MockInterpreterPort;

/// Errors surfaced by help providers.
///
/// A page that simply does not exist is not an error; providers return
/// `Ok(None)` for it so callers can try their next strategy.
#[derive(Debug, Error)]
pub enum HelpError {
    /// Options or discovered environment cannot be used.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Filesystem operation on provider-owned state failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The interpreter could not be queried.
    #[error("Interpreter error: {0}")]
    Interpreter(#[from] InterpreterError),

    /// The provider was disposed and accepts no more requests.
    #[error("Help provider has been disposed")]
    Disposed,

    /// The help server never became ready.
    #[error("Help server did not start: {0}")]
    ServerStart(String),

    /// The help server answered with an unexpected status.
    #[error("Help server returned status {status} for {url}")]
    Server { status: u16, url: String },

    /// Transport failure talking to the help server.
    #[error("Network error: {0}")]
    Network(String),
}

impl HelpError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_message() {
        let err = HelpError::Server {
            status: 500,
            url: "http://127.0.0.1:1234/doc/html/index.html".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("doc/html/index.html"));
    }

    #[test]
    fn test_interpreter_error_converts() {
        let err: HelpError = InterpreterError::Io("boom".to_string()).into();
        assert!(matches!(err, HelpError::Interpreter(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = HelpError::io(
            "/tmp/rhelp-x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/rhelp-x"));
    }
}
