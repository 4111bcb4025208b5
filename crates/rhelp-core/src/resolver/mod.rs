//! Filesystem resolution against an interpreter environment.
//!
//! Given a request path and the discovered home/library roots, this module
//! decides where a pre-rendered page or a help archive lives. Probing is
//! synchronous; callers on an async runtime keep the candidate lists short.

mod location;

pub use location::{
    ArchiveLocation, HELP_ARCHIVE_DIR, archive_locations, candidate_locations, has_archive_pair,
    resolve_real,
};
