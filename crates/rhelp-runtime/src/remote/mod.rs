//! Remote backend: R's own dynamic help server behind an HTTP proxy.

mod client;
mod launch;
mod state;

pub use client::RemoteHelpClient;
pub use launch::{HELP_SERVER_EXPR, help_server_args, spawn_help_server};
pub use state::{ServerState, parse_port_announcement};
