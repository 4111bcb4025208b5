//! CLI bootstrap - the composition root.
//!
//! This is the only place where the help provider is built. Handlers get a
//! `CliContext` and work through the `HelpProvider` trait.

use std::sync::Arc;

use anyhow::Result;
use rhelp_core::{HelpOptions, HelpProvider};
use rhelp_runtime::build_provider;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub options: HelpOptions,
}

impl CliConfig {
    /// Options from parsed global flags.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut options = HelpOptions::new()
            .with_r_path(cli.r_path.clone())
            .with_backend(cli.backend.into());
        if !cli.lib_paths.is_empty() {
            options = options.with_lib_paths(cli.lib_paths.clone());
        }
        if let Some(home) = &cli.home {
            options = options.with_home_path(home.clone());
        }
        Self { options }
    }
}

/// Composed context for CLI commands.
pub struct CliContext {
    pub provider: Arc<dyn HelpProvider>,
    pub options: HelpOptions,
}

impl CliContext {
    pub fn provider(&self) -> Arc<dyn HelpProvider> {
        Arc::clone(&self.provider)
    }

    /// Release the provider's subprocesses and temp files.
    pub async fn shutdown(&self) {
        self.provider.dispose().await;
    }
}

/// Build the help provider selected by the configuration.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let provider = build_provider(&config.options)
        .await
        .map_err(CliError::from)?;

    Ok(CliContext {
        provider,
        options: config.options,
    })
}
