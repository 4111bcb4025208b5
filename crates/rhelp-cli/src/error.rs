//! CLI-specific error types and exit codes.

use rhelp_core::{HelpError, PanelError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Nothing was found for the request.
    #[error("No help found for {0}")]
    NotFound(String),

    /// Argument or input error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (output file, stdin).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The interpreter or help server failed.
    #[error("Interpreter error: {0}")]
    Interpreter(String),

    /// Talking to the help server failed.
    #[error("Help server error: {0}")]
    Server(String),
}

impl CliError {
    /// Map error to an exit code (sysexits.h where one fits).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => 66,    // EX_NOINPUT
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
            Self::Interpreter(_) => 71, // EX_OSERR
            Self::Server(_) => 69,      // EX_UNAVAILABLE
        }
    }
}

impl From<HelpError> for CliError {
    fn from(err: HelpError) -> Self {
        match err {
            HelpError::Configuration(msg) => Self::Config(msg),
            HelpError::Io { .. } => Self::Io(err.to_string()),
            HelpError::Interpreter(e) => Self::Interpreter(e.to_string()),
            HelpError::ServerStart(_) | HelpError::Disposed => Self::Interpreter(err.to_string()),
            HelpError::Server { .. } | HelpError::Network(_) => Self::Server(err.to_string()),
        }
    }
}

impl From<PanelError> for CliError {
    fn from(err: PanelError) -> Self {
        match err {
            PanelError::NoPackage { .. } => Self::Arguments(err.to_string()),
            PanelError::Provider(e) => e.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhelp_core::InterpreterError;

    #[test]
    fn test_help_errors_map_to_exit_codes() {
        let config: CliError = HelpError::Configuration("no libs".to_string()).into();
        assert_eq!(config.exit_code(), 78);

        let interp: CliError = HelpError::Interpreter(InterpreterError::Timeout {
            command: "R".to_string(),
            seconds: 60,
        })
        .into();
        assert_eq!(interp.exit_code(), 71);

        let server: CliError = HelpError::Server {
            status: 500,
            url: "http://127.0.0.1:1/x".to_string(),
        }
        .into();
        assert_eq!(server.exit_code(), 69);
    }

    #[test]
    fn test_panel_errors() {
        let err: CliError = PanelError::NoPackage {
            function: "lm".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("lm"));
    }

    #[test]
    fn test_not_found_message() {
        let err = CliError::NotFound("stats::nothing".to_string());
        assert_eq!(err.to_string(), "No help found for stats::nothing");
        assert_eq!(err.exit_code(), 66);
    }
}
