//! Interpreter environment discovery.
//!
//! Explicit options win; whatever is missing is asked from the interpreter.

use rhelp_core::{HelpError, HelpOptions, InterpreterEnv, InterpreterPort};
use tracing::{debug, info, warn};

/// Combine `options` with what the interpreter reports about itself.
///
/// An unknown home is tolerated (only doc pages need it). Library roots are
/// required: explicit ones are used as given, otherwise the interpreter is
/// asked and its failure is returned.
pub async fn discover_env(
    options: &HelpOptions,
    interpreter: &dyn InterpreterPort,
) -> Result<InterpreterEnv, HelpError> {
    options.validate()?;

    let home_path = match &options.home_path {
        Some(home) => Some(home.clone()),
        None if options.has_interpreter() => match interpreter.home_path().await {
            Ok(home) => Some(home),
            Err(e) => {
                warn!(error = %e, "Could not query interpreter home; doc pages unavailable");
                None
            }
        },
        None => None,
    };

    let lib_paths = match &options.lib_paths {
        Some(libs) if !libs.is_empty() => {
            debug!(count = libs.len(), "Using configured library paths");
            libs.clone()
        }
        _ if options.has_interpreter() => interpreter.lib_paths().await?,
        _ => {
            return Err(HelpError::Configuration(
                "no interpreter configured and no library paths given".to_string(),
            ));
        }
    };

    let env = InterpreterEnv::new(home_path, lib_paths)?;
    info!(
        home = ?env.home_path(),
        libraries = env.lib_paths().len(),
        "Discovered interpreter environment"
    );
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhelp_core::InterpreterError;
    use rhelp_core::ports::MockInterpreterPort;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_queries_interpreter_when_nothing_is_given() {
        let mut mock = MockInterpreterPort::new();
        mock.expect_home_path()
            .times(1)
            .returning(|| Ok(PathBuf::from("/opt/R")));
        mock.expect_lib_paths()
            .times(1)
            .returning(|| Ok(vec![PathBuf::from("/opt/R/library")]));

        let env = discover_env(&HelpOptions::new(), &mock).await.unwrap();
        assert_eq!(env.home_path(), Some(PathBuf::from("/opt/R").as_path()));
        assert_eq!(env.lib_paths(), &[PathBuf::from("/opt/R/library")]);
    }

    #[tokio::test]
    async fn test_explicit_paths_skip_interpreter() {
        let mut mock = MockInterpreterPort::new();
        mock.expect_home_path().never();
        mock.expect_lib_paths().never();

        let options = HelpOptions::new()
            .with_home_path("/custom/R")
            .with_lib_paths(vec![PathBuf::from("/custom/lib")]);
        let env = discover_env(&options, &mock).await.unwrap();
        assert_eq!(env.lib_paths(), &[PathBuf::from("/custom/lib")]);
    }

    #[tokio::test]
    async fn test_home_failure_is_tolerated() {
        let mut mock = MockInterpreterPort::new();
        mock.expect_home_path().returning(|| {
            Err(InterpreterError::Io("no home".to_string()))
        });
        mock.expect_lib_paths().never();

        let options = HelpOptions::new().with_lib_paths(vec![PathBuf::from("/lib")]);
        let env = discover_env(&options, &mock).await.unwrap();
        assert!(env.home_path().is_none());
    }

    #[tokio::test]
    async fn test_empty_discovered_libraries_is_configuration_error() {
        let mut mock = MockInterpreterPort::new();
        mock.expect_home_path()
            .returning(|| Ok(PathBuf::from("/opt/R")));
        mock.expect_lib_paths().returning(|| Ok(Vec::new()));

        let err = discover_env(&HelpOptions::new(), &mock).await.unwrap_err();
        assert!(matches!(err, HelpError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_no_interpreter_no_libs_fails_before_any_call() {
        let mut mock = MockInterpreterPort::new();
        mock.expect_home_path().never();
        mock.expect_lib_paths().never();

        let options = HelpOptions::new().with_r_path("");
        let err = discover_env(&options, &mock).await.unwrap_err();
        assert!(matches!(err, HelpError::Configuration(_)));
    }
}
