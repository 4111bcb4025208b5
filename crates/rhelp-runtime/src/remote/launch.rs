//! Spawning R's dynamic help server.

use std::process::Stdio;

use rhelp_core::HelpError;
use tokio::process::{Child, Command};
use tracing::info;

/// R code that starts the help server, prints its port and keeps the
/// session alive.
pub const HELP_SERVER_EXPR: &str = "cat(tools::startDynamicHelp(),'\\n'); while(TRUE) Sys.sleep(1)";

/// Arguments for the long-running help server session.
pub fn help_server_args() -> Vec<String> {
    ["--silent", "--no-echo", "--vanilla", "-e", HELP_SERVER_EXPR]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

/// Spawn the help server with piped stdout/stderr.
///
/// The child is killed if its handle is dropped without a graceful
/// shutdown.
pub fn spawn_help_server(r_path: &str) -> Result<Child, HelpError> {
    info!(r_path, "Launching R help server");

    Command::new(r_path)
        .args(help_server_args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| HelpError::ServerStart(format!("failed to spawn {r_path}: {e}")))
}
