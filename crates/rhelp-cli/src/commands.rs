//! Available subcommands.

use std::path::PathBuf;

use clap::Subcommand;

/// Commands of the `rhelp` tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the documentation of a function
    Show {
        /// Package the function belongs to (e.g. "stats")
        package: String,
        /// Function or topic name (e.g. "lm")
        topic: String,
        /// Write the page to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a top-level documentation page
    Doc {
        /// Page under doc/html (e.g. "index.html")
        #[arg(default_value = "index.html")]
        page: String,
        /// Write the page to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve a raw help-server request path
    Path {
        /// Request path (e.g. "library/utils/html/help.html")
        request_path: String,
        /// Print the resolved help file as JSON
        #[arg(long)]
        json: bool,
        /// Write the page to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the discovered R home and library roots
    Paths,

    /// Browse help pages interactively
    Browse {
        /// Write each shown page to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
