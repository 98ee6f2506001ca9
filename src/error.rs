//! Crate-wide error type.

use std::path::PathBuf;
use std::time::Duration;

/// Errors raised by the playlist store, rotation engine, ingest gateway and
/// command façade. Every variant is recoverable: the façade turns each one
/// into a short reply and keeps serving.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Operation on a group key that was never registered.
    #[error("group not registered: {0}")]
    UnknownGroup(String),

    /// The group exists but its queue holds no tracks.
    #[error("playlist is empty for group: {0}")]
    EmptyPlaylist(String),

    /// Ingest without at least one destination group.
    #[error("no groups registered")]
    NoGroupsRegistered,

    /// Registration with a blank key.
    #[error("invalid group key: {0:?}")]
    InvalidGroupKey(String),

    /// The durable state could not be read (missing medium, corrupt document
    /// or a read that did not finish in time).
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A snapshot could not be written; the previous durable state is intact.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// The mutation lock was not released within the configured wait.
    #[error("store busy: mutation lock not acquired within {0:?}")]
    StoreBusy(Duration),

    /// Ingest of a file whose extension is not in `accepted`.
    #[error("unsupported file type: {name}")]
    UnsupportedFileType { name: String, accepted: Vec<String> },

    /// Directory import pointed at something that is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
