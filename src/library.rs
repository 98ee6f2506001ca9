//! Track records and the local ingest helpers that produce them.
//!
//! `model` holds the immutable [`TrackRecord`]; `tags` extracts title/artist
//! from a single uploaded file and `scan` walks a directory for bulk imports.

mod model;
mod scan;
mod tags;

pub use model::{TrackRecord, UNKNOWN_ARTIST};
pub use scan::scan;
pub use tags::{ensure_accepted, is_accepted, read_track};
