//! Configuration for help providers.
//!
//! `HelpOptions` is what a user or adapter supplies. `InterpreterEnv` is the
//! validated result of combining those options with what the interpreter
//! reports about itself; it is built once and passed by reference to every
//! resolver call.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ports::HelpError;

/// Default interpreter executable.
pub const DEFAULT_R_PATH: &str = "R";

/// Default bound for a single interpreter subprocess call.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// Default bound for the help server to announce its port.
pub const DEFAULT_SERVER_START_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound for a single proxied request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Which backend serves help pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Read pre-rendered files and extract archives in-process.
    #[default]
    Local,
    /// Proxy to the interpreter's own dynamic help server.
    Remote,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// User-facing options for building a help provider.
///
/// # Example
///
/// ```
/// use rhelp_core::config::HelpOptions;
/// use std::time::Duration;
///
/// let options = HelpOptions::new()
///     .with_r_path("/usr/bin/R")
///     .with_command_timeout(Duration::from_secs(10));
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct HelpOptions {
    /// Interpreter executable. May be empty when `lib_paths` is given.
    pub r_path: String,
    /// Installed package roots. Queried from the interpreter when absent.
    pub lib_paths: Option<Vec<PathBuf>>,
    /// Value of `R.home()`. Queried from the interpreter when absent.
    pub home_path: Option<PathBuf>,
    /// Backend selection.
    pub backend: BackendKind,
    /// Bound for each interpreter subprocess call.
    pub command_timeout: Duration,
    /// Bound for the help server's port announcement.
    pub server_start_timeout: Duration,
    /// Bound for each proxied HTTP request.
    pub request_timeout: Duration,
}

impl Default for HelpOptions {
    fn default() -> Self {
        Self {
            r_path: DEFAULT_R_PATH.to_string(),
            lib_paths: None,
            home_path: None,
            backend: BackendKind::default(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            server_start_timeout: DEFAULT_SERVER_START_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl HelpOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_r_path(mut self, r_path: impl Into<String>) -> Self {
        self.r_path = r_path.into();
        self
    }

    #[must_use]
    pub fn with_lib_paths(mut self, lib_paths: Vec<PathBuf>) -> Self {
        self.lib_paths = Some(lib_paths);
        self
    }

    #[must_use]
    pub fn with_home_path(mut self, home_path: impl Into<PathBuf>) -> Self {
        self.home_path = Some(home_path.into());
        self
    }

    #[must_use]
    pub const fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    #[must_use]
    pub const fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_server_start_timeout(mut self, timeout: Duration) -> Self {
        self.server_start_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Whether an interpreter executable was configured.
    pub fn has_interpreter(&self) -> bool {
        !self.r_path.trim().is_empty()
    }

    /// Check the options before any subprocess is started.
    pub fn validate(&self) -> Result<(), HelpError> {
        let has_lib_paths = self.lib_paths.as_ref().is_some_and(|p| !p.is_empty());

        if !self.has_interpreter() && !has_lib_paths {
            return Err(HelpError::Configuration(
                "no interpreter path and no library paths configured".to_string(),
            ));
        }

        if self.backend == BackendKind::Remote && !self.has_interpreter() {
            return Err(HelpError::Configuration(
                "the remote backend needs an interpreter path".to_string(),
            ));
        }

        Ok(())
    }
}

/// Interpreter installation facts shared by all resolver operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterEnv {
    home_path: Option<PathBuf>,
    lib_paths: Vec<PathBuf>,
}

impl InterpreterEnv {
    /// Build the environment.
    ///
    /// Library roots keep their order (first match wins). Empty entries are
    /// dropped. An empty root set is a configuration error.
    pub fn new(home_path: Option<PathBuf>, lib_paths: Vec<PathBuf>) -> Result<Self, HelpError> {
        let home_path = home_path.filter(|p| !p.as_os_str().is_empty());
        let lib_paths: Vec<PathBuf> = lib_paths
            .into_iter()
            .filter(|p| !p.as_os_str().is_empty())
            .collect();

        if lib_paths.is_empty() {
            return Err(HelpError::Configuration(
                "no library paths to search for help files".to_string(),
            ));
        }

        Ok(Self {
            home_path,
            lib_paths,
        })
    }

    pub fn home_path(&self) -> Option<&Path> {
        self.home_path.as_deref()
    }

    pub fn lib_paths(&self) -> &[PathBuf] {
        &self.lib_paths
    }
}

impl std::fmt::Display for InterpreterEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.home_path {
            Some(home) => writeln!(f, "home_path = {}", home.display())?,
            None => writeln!(f, "home_path = (unknown)")?,
        }
        for (index, lib) in self.lib_paths.iter().enumerate() {
            writeln!(f, "lib_paths[{index}] = {}", lib.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = HelpOptions::new();
        assert_eq!(options.r_path, "R");
        assert!(options.lib_paths.is_none());
        assert_eq!(options.backend, BackendKind::Local);
        assert_eq!(options.command_timeout, DEFAULT_COMMAND_TIMEOUT);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let options = HelpOptions::new()
            .with_r_path("/opt/R/bin/R")
            .with_home_path("/opt/R")
            .with_lib_paths(vec![PathBuf::from("/opt/R/library")])
            .with_backend(BackendKind::Remote)
            .with_server_start_timeout(Duration::from_secs(5));

        assert_eq!(options.r_path, "/opt/R/bin/R");
        assert_eq!(options.home_path, Some(PathBuf::from("/opt/R")));
        assert_eq!(options.backend, BackendKind::Remote);
        assert_eq!(options.server_start_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_no_interpreter_and_no_lib_paths_is_rejected() {
        let options = HelpOptions::new().with_r_path("  ");
        assert!(matches!(
            options.validate(),
            Err(HelpError::Configuration(_))
        ));

        let options = HelpOptions::new().with_r_path("").with_lib_paths(vec![]);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_lib_paths_without_interpreter_is_accepted() {
        let options = HelpOptions::new()
            .with_r_path("")
            .with_lib_paths(vec![PathBuf::from("/lib")]);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_remote_backend_requires_interpreter() {
        let options = HelpOptions::new()
            .with_r_path("")
            .with_lib_paths(vec![PathBuf::from("/lib")])
            .with_backend(BackendKind::Remote);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_env_drops_empty_entries_and_keeps_order() {
        let env = InterpreterEnv::new(
            Some(PathBuf::new()),
            vec![
                PathBuf::from("/user/lib"),
                PathBuf::new(),
                PathBuf::from("/system/lib"),
            ],
        )
        .unwrap();

        assert!(env.home_path().is_none());
        assert_eq!(
            env.lib_paths(),
            &[PathBuf::from("/user/lib"), PathBuf::from("/system/lib")]
        );
    }

    #[test]
    fn test_env_rejects_empty_root_set() {
        let result = InterpreterEnv::new(Some(PathBuf::from("/opt/R")), vec![]);
        assert!(matches!(result, Err(HelpError::Configuration(_))));
    }

    #[test]
    fn test_env_display() {
        let env = InterpreterEnv::new(
            Some(PathBuf::from("/opt/R")),
            vec![PathBuf::from("/opt/R/library")],
        )
        .unwrap();
        let output = env.to_string();
        assert!(output.contains("home_path = /opt/R"));
        assert!(output.contains("lib_paths[0] = /opt/R/library"));
    }

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::Local.to_string(), "local");
        assert_eq!(BackendKind::Remote.to_string(), "remote");
    }
}
