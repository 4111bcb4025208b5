//! Runtime adapters for rhelp.
//!
//! Everything that touches the outside world lives here: the R subprocess
//! behind `InterpreterPort`, the local provider with its archive
//! extraction, and the remote client that proxies to R's help server.

pub mod backend;
pub mod extract;
pub mod interpreter;
pub mod process;
pub mod provider;
pub mod remote;

pub use backend::{build_provider, build_provider_with};
pub use extract::ArchiveExtractor;
pub use interpreter::{RInterpreter, discover_env};
pub use provider::LocalHelpProvider;
pub use remote::{RemoteHelpClient, ServerState};
