//! Help provider that proxies to R's dynamic help server.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rhelp_core::config::BackendKind;
use rhelp_core::{
    FileLocation, HelpError, HelpFile, HelpOptions, HelpProvider, normalize_request_path,
};
use tokio::io::BufReader;
use tokio::process::{Child, ChildStdout};
use tokio::sync::{Mutex, watch};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::launch::spawn_help_server;
use super::state::{ServerState, parse_port_announcement};
use crate::process::{read_line_lossy, shutdown_child, spawn_stream_logger};

/// Client for a help server running in a child R session.
pub struct RemoteHelpClient {
    state_tx: Arc<watch::Sender<ServerState>>,
    state_rx: watch::Receiver<ServerState>,
    child: Mutex<Option<Child>>,
    http: reqwest::Client,
    server_start_timeout: Duration,
}

impl RemoteHelpClient {
    /// Spawn the help server and start watching for its port.
    ///
    /// Returns immediately; requests wait for the port announcement.
    pub fn launch(options: &HelpOptions) -> Result<Self, HelpError> {
        if !options.has_interpreter() {
            return Err(HelpError::Configuration(
                "the remote backend needs an interpreter path".to_string(),
            ));
        }
        let child = spawn_help_server(options.r_path.trim())?;
        Self::from_child(child, options)
    }

    /// Wrap an already spawned help server process.
    pub fn from_child(mut child: Child, options: &HelpOptions) -> Result<Self, HelpError> {
        let http = reqwest::Client::builder()
            .timeout(options.request_timeout)
            .no_proxy()
            .build()
            .map_err(|e| HelpError::Configuration(format!("failed to build HTTP client: {e}")))?;

        let (state_tx, state_rx) = watch::channel(ServerState::Launching);
        let state_tx = Arc::new(state_tx);

        if let Some(stderr) = child.stderr.take() {
            spawn_stream_logger(stderr, "help-server-stderr");
        }
        match child.stdout.take() {
            Some(stdout) => {
                tokio::spawn(watch_stdout(stdout, Arc::clone(&state_tx)));
            }
            None => {
                state_tx.send_replace(ServerState::Failed {
                    reason: "help server stdout is not captured".to_string(),
                });
            }
        }

        Ok(Self {
            state_tx,
            state_rx,
            child: Mutex::new(Some(child)),
            http,
            server_start_timeout: options.server_start_timeout,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServerState {
        self.state_rx.borrow().clone()
    }

    pub fn is_disposed(&self) -> bool {
        matches!(*self.state_rx.borrow(), ServerState::Disposed)
    }

    /// Wait until the server announced its port, failed, or the start
    /// timeout elapsed.
    pub async fn wait_for_port(&self) -> Result<u16, HelpError> {
        let mut rx = self.state_rx.clone();
        let settled = async move {
            loop {
                let state = rx.borrow_and_update().clone();
                if !state.is_launching() {
                    return Some(state);
                }
                if rx.changed().await.is_err() {
                    return None;
                }
            }
        };

        let state = match timeout(self.server_start_timeout, settled).await {
            Ok(Some(state)) => state,
            Ok(None) => {
                return Err(HelpError::ServerStart(
                    "help server state channel closed".to_string(),
                ));
            }
            Err(_) => {
                return Err(HelpError::ServerStart(format!(
                    "no port announced within {}s",
                    self.server_start_timeout.as_secs()
                )));
            }
        };

        match state {
            ServerState::Ready { port } => Ok(port),
            ServerState::Failed { reason } => Err(HelpError::ServerStart(reason)),
            ServerState::Disposed => Err(HelpError::Disposed),
            ServerState::Launching => Err(HelpError::ServerStart(
                "help server is still launching".to_string(),
            )),
        }
    }
}

/// Read the port announcement, then keep logging the rest of stdout.
async fn watch_stdout(stdout: ChildStdout, state_tx: Arc<watch::Sender<ServerState>>) {
    let mut reader = BufReader::new(stdout);

    let announced = match read_line_lossy(&mut reader).await {
        Ok(Some(line)) => parse_port_announcement(&line),
        Ok(None) => Err("help server exited before announcing its port".to_string()),
        Err(e) => Err(format!("failed to read help server output: {e}")),
    };

    let next = match announced {
        Ok(port) => {
            info!(port, "R help server is ready");
            ServerState::Ready { port }
        }
        Err(reason) => {
            warn!(reason = %reason, "R help server failed to start");
            ServerState::Failed { reason }
        }
    };
    state_tx.send_if_modified(|state| {
        if state.is_launching() {
            *state = next;
            true
        } else {
            false
        }
    });

    loop {
        match read_line_lossy(&mut reader).await {
            Ok(Some(line)) => debug!(source = "help-server-stdout", "{line}"),
            Ok(None) | Err(_) => break,
        }
    }

    state_tx.send_if_modified(|state| {
        if matches!(state, ServerState::Ready { .. }) {
            warn!("R help server exited");
            *state = ServerState::Failed {
                reason: "help server exited".to_string(),
            };
            true
        } else {
            false
        }
    });
}

#[async_trait]
impl HelpProvider for RemoteHelpClient {
    fn backend(&self) -> BackendKind {
        BackendKind::Remote
    }

    async fn get_help_file_from_request_path(
        &self,
        request_path: &str,
        _prev_location: Option<&FileLocation>,
    ) -> Result<Option<HelpFile>, HelpError> {
        if self.is_disposed() {
            return Err(HelpError::Disposed);
        }

        let port = self.wait_for_port().await?;
        // Recorded paths must match the request grammar
        let request_path = normalize_request_path(request_path);
        let url = format!("http://127.0.0.1:{port}/{request_path}");
        debug!(url = %url, "Requesting help page");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| HelpError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(HelpError::Server {
                status: status.as_u16(),
                url,
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| HelpError::Network(e.to_string()))?;
        Ok(Some(HelpFile::generated(&request_path, html, None)))
    }

    async fn dispose(&self) {
        let previous = self.state_tx.send_replace(ServerState::Disposed);
        if previous == ServerState::Disposed {
            return;
        }

        let child = self.child.lock().await.take();
        if let Some(child) = child {
            match shutdown_child(child).await {
                Ok(status) => info!(%status, "R help server stopped"),
                Err(e) => warn!(error = %e, "Failed to stop R help server"),
            }
        }
    }
}
