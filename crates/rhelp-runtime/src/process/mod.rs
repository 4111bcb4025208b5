//! Child process helpers shared by the interpreter and the help server.

mod shutdown;
mod stream;

pub use shutdown::shutdown_child;
pub use stream::{read_line_lossy, spawn_stream_logger};
