//! Main CLI parser and top-level argument handling.
//!
//! Global options describe how to reach the R installation; they are shared
//! by every subcommand and can also come from the environment (or `.env`).

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rhelp_core::BackendKind;

use crate::commands::Commands;

/// Browse R documentation from the terminal.
#[derive(Parser)]
#[command(name = "rhelp")]
#[command(about = "Find, extract and browse R help pages")]
#[command(version)]
pub struct Cli {
    /// R executable used for discovery, extraction and the help server
    #[arg(long = "r-path", global = true, env = "RHELP_R_PATH", default_value = "R")]
    pub r_path: String,

    /// Library root to search (repeatable; overrides `.libPaths()`)
    #[arg(
        long = "lib-path",
        global = true,
        env = "RHELP_LIB_PATHS",
        value_delimiter = ':'
    )]
    pub lib_paths: Vec<PathBuf>,

    /// R home directory (overrides `R.home()`)
    #[arg(long = "home", global = true, env = "RHELP_HOME")]
    pub home: Option<PathBuf>,

    /// Where help pages come from
    #[arg(long, global = true, value_enum, default_value_t = BackendArg::Local)]
    pub backend: BackendArg,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// `--backend` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// Read installed files and extract help archives
    Local,
    /// Proxy to R's dynamic help server
    Remote,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Local => Self::Local,
            BackendArg::Remote => Self::Remote,
        }
    }
}
