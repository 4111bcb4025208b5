//! Backend selection.
//!
//! This is the one place that knows both provider implementations; callers
//! get an `Arc<dyn HelpProvider>` and never branch on the backend again.

use std::sync::Arc;

use rhelp_core::{BackendKind, HelpError, HelpOptions, HelpProvider, InterpreterPort};
use tracing::info;

use crate::interpreter::{RInterpreter, discover_env};
use crate::provider::LocalHelpProvider;
use crate::remote::RemoteHelpClient;

/// Build the provider selected by `options.backend`.
pub async fn build_provider(options: &HelpOptions) -> Result<Arc<dyn HelpProvider>, HelpError> {
    let interpreter: Arc<dyn InterpreterPort> = Arc::new(RInterpreter::from_options(options));
    build_provider_with(options, interpreter).await
}

/// Build a provider on top of an existing interpreter port.
pub async fn build_provider_with(
    options: &HelpOptions,
    interpreter: Arc<dyn InterpreterPort>,
) -> Result<Arc<dyn HelpProvider>, HelpError> {
    options.validate()?;
    info!(backend = %options.backend, "Building help provider");

    match options.backend {
        BackendKind::Local => {
            let env = discover_env(options, interpreter.as_ref()).await?;
            let provider = LocalHelpProvider::new(env, interpreter).await?;
            Ok(Arc::new(provider))
        }
        BackendKind::Remote => Ok(Arc::new(RemoteHelpClient::launch(options)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhelp_core::ports::MockInterpreterPort;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_local_backend_with_explicit_libraries() {
        let lib = tempfile::TempDir::new().unwrap();
        let mut mock = MockInterpreterPort::new();
        mock.expect_home_path().never();
        mock.expect_lib_paths().never();

        let options = HelpOptions::new()
            .with_r_path("")
            .with_lib_paths(vec![lib.path().to_path_buf()]);
        let provider = build_provider_with(&options, Arc::new(mock)).await.unwrap();
        assert_eq!(provider.backend(), BackendKind::Local);
        provider.dispose().await;
    }

    #[tokio::test]
    async fn test_remote_backend_without_interpreter_is_rejected() {
        let options = HelpOptions::new()
            .with_r_path("")
            .with_lib_paths(vec![PathBuf::from("/lib")])
            .with_backend(BackendKind::Remote);
        let err = build_provider_with(&options, Arc::new(MockInterpreterPort::new()))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, HelpError::Configuration(_)));
    }
}
