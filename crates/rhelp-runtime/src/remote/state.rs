//! Help server lifecycle.

use std::fmt;

/// Where the help server is in its lifecycle.
///
/// `Launching` moves to exactly one of `Ready` or `Failed`. `Disposed` can
/// be entered from any state and is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerState {
    Launching,
    Ready { port: u16 },
    Failed { reason: String },
    Disposed,
}

impl ServerState {
    pub const fn port(&self) -> Option<u16> {
        match self {
            Self::Ready { port } => Some(*port),
            _ => None,
        }
    }

    pub const fn is_launching(&self) -> bool {
        matches!(self, Self::Launching)
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launching => write!(f, "launching"),
            Self::Ready { port } => write!(f, "ready on port {port}"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
            Self::Disposed => write!(f, "disposed"),
        }
    }
}

/// Parse the help server's port announcement (first stdout line).
pub fn parse_port_announcement(line: &str) -> Result<u16, String> {
    let trimmed = line.trim();
    match trimmed.parse::<u16>() {
        Ok(0) => Err("help server announced port 0".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!("unexpected port announcement: {trimmed:?}")),
    }
}
