//! Store I/O thread.
//!
//! All reads and writes of the snapshot file happen on one thread so callers
//! can stop waiting after a bounded time without leaving the file half written.
//! A save is only renamed into place while its [`Commit`] is still pending;
//! once the waiter marks it abandoned the temporary file is discarded.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::error::{Error, Result};

use super::state::StoreState;

/// Outcome of a save as agreed between the waiter and the I/O thread.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum Commit {
    /// Not renamed yet; the waiter still expects an answer.
    Pending,
    /// The waiter gave up and reported a failure; the save must not land.
    Abandoned,
    /// The snapshot was renamed over the durable file.
    Done,
}

pub(super) type CommitHandle = Arc<Mutex<Commit>>;

pub(super) enum IoCmd {
    /// Read and parse the current snapshot.
    Load { reply: Sender<Result<StoreState>> },
    /// Replace the snapshot with `bytes` unless `commit` was abandoned.
    Save {
        bytes: Vec<u8>,
        commit: CommitHandle,
        reply: Sender<Result<()>>,
    },
}

pub(super) fn spawn_io_thread(path: PathBuf, rx: Receiver<IoCmd>) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("squonk-store-io".to_string())
        .spawn(move || {
            // Waiters that timed out have dropped their receiver; ignore send errors.
            while let Ok(cmd) = rx.recv() {
                match cmd {
                    IoCmd::Load { reply } => {
                        let _ = reply.send(read_snapshot(&path));
                    }
                    IoCmd::Save {
                        bytes,
                        commit,
                        reply,
                    } => {
                        let _ = reply.send(write_snapshot(&path, &bytes, &commit));
                    }
                }
            }
            tracing::debug!(path = %path.display(), "store io thread stopped");
        })
}

/// `songs.json` -> `songs.json.tmp`, next to the target so the rename stays
/// on one filesystem.
pub(super) fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("store"));
    name.push(".tmp");
    path.with_file_name(name)
}

pub(super) fn read_snapshot(path: &Path) -> Result<StoreState> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StoreState::default()),
        Err(e) => {
            return Err(Error::StorageUnavailable(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(StoreState::default());
    }

    serde_json::from_slice(&bytes).map_err(|e| {
        Error::StorageUnavailable(format!("corrupt snapshot {}: {e}", path.display()))
    })
}

fn write_temp(tmp: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(tmp)?;
    file.write_all(bytes)?;
    file.sync_all()
}

pub(super) fn write_snapshot(path: &Path, bytes: &[u8], commit: &CommitHandle) -> Result<()> {
    if *commit.lock() == Commit::Abandoned {
        return Err(Error::PersistenceError(
            "save abandoned before it started".to_string(),
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            Error::PersistenceError(format!(
                "failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp = temp_path(path);
    let result = write_temp(&tmp, bytes)
        .map_err(|e| {
            Error::PersistenceError(format!("failed to write {}: {e}", tmp.display()))
        })
        .and_then(|()| {
            let mut state = commit.lock();
            if *state == Commit::Abandoned {
                return Err(Error::PersistenceError(
                    "save abandoned after timeout".to_string(),
                ));
            }
            fs::rename(&tmp, path).map_err(|e| {
                Error::PersistenceError(format!(
                    "failed to replace {}: {e}",
                    path.display()
                ))
            })?;
            *state = Commit::Done;
            Ok(())
        });

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
