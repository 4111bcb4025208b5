//! Core of rhelp: locating, extracting and navigating R help pages.
//!
//! This crate holds the domain types, the filesystem resolver, link
//! handling, the history-aware panel and the ports implemented by
//! `rhelp-runtime`. It never spawns processes or opens sockets.

pub mod config;
pub mod domain;
pub mod links;
pub mod ports;
pub mod resolver;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{BackendKind, HelpOptions, InterpreterEnv};
pub use domain::{
    FileLocation, HelpFile, HistoryEntry, NavigationHistory, RequestPath, RequestShape,
    doc_request_path, function_request_path, normalize_request_path, split_request_path,
};
pub use links::{LinkTarget, classify_link, extract_links, rewrite_relative_links};
pub use ports::{
    HelpError, HelpProvider, HelpView, InterpreterError, InterpreterPort, NoopView, RenderedPage,
};
pub use resolver::{archive_locations, candidate_locations, has_archive_pair, resolve_real};
pub use services::{HelpPanel, NavButton, PanelError, PanelMessage};
