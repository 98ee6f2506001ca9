use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::StoreSettings;
use crate::error::{Error, Result};

use super::state::StoreState;
use super::worker::{Commit, IoCmd, spawn_io_thread};

/// Durable mapping from group key to [`GroupQueue`](super::GroupQueue).
///
/// The snapshot file is owned exclusively by this type. Every mutation runs
/// load -> transform -> save under one mutation lock, so two callers can never
/// build on the same stale snapshot. Reads go straight to the file; the atomic
/// rename on save means they only ever observe complete snapshots.
pub struct PlaylistStore {
    path: PathBuf,
    tx: Sender<IoCmd>,
    mutation: Mutex<()>,
    lock_timeout: Duration,
    io_timeout: Duration,
}

impl PlaylistStore {
    /// Open the store described by `settings`, starting its I/O thread.
    ///
    /// Nothing is read here; a missing file simply means an empty store.
    pub fn open(settings: &StoreSettings) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<IoCmd>();
        spawn_io_thread(settings.path.clone(), rx).map_err(|e| {
            Error::StorageUnavailable(format!("failed to start store io thread: {e}"))
        })?;

        Ok(Self {
            path: settings.path.clone(),
            tx,
            mutation: Mutex::new(()),
            lock_timeout: settings.lock_timeout(),
            io_timeout: settings.io_timeout(),
        })
    }

    /// Open and wrap in an `Arc` for sharing between handler threads.
    pub fn open_shared(settings: &StoreSettings) -> Result<Arc<Self>> {
        Self::open(settings).map(Arc::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current durable state.
    ///
    /// Fails with [`Error::StorageUnavailable`] when the file cannot be read,
    /// is corrupt, or the read does not finish within the I/O timeout.
    pub fn load(&self) -> Result<StoreState> {
        let (reply, rx) = mpsc::channel();
        self.tx
            .send(IoCmd::Load { reply })
            .map_err(|_| Error::StorageUnavailable("store io thread stopped".to_string()))?;

        match rx.recv_timeout(self.io_timeout) {
            Ok(result) => {
                if let Err(e) = &result {
                    tracing::warn!(path = %self.path.display(), error = %e, "store load failed");
                }
                result
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(path = %self.path.display(), timeout = ?self.io_timeout, "store load timed out");
                Err(Error::StorageUnavailable(format!(
                    "load timed out after {:?}",
                    self.io_timeout
                )))
            }
            Err(RecvTimeoutError::Disconnected) => Err(Error::StorageUnavailable(
                "store io thread stopped".to_string(),
            )),
        }
    }

    /// Atomically load the current state, apply `transform`, and persist the
    /// result.
    ///
    /// Mutations are serialized; a caller waits at most the configured lock
    /// timeout before failing with [`Error::StoreBusy`]. If `transform` fails,
    /// or the state cannot be loaded or saved, nothing is written and the
    /// previous snapshot stays in place. A transform that leaves the state
    /// unchanged does not touch the file.
    pub fn mutate<R>(&self, transform: impl FnOnce(&mut StoreState) -> Result<R>) -> Result<R> {
        let Some(_guard) = self.mutation.try_lock_for(self.lock_timeout) else {
            tracing::warn!(timeout = ?self.lock_timeout, "store mutation lock wait expired");
            return Err(Error::StoreBusy(self.lock_timeout));
        };

        let mut state = self.load()?;
        let before = state.clone();
        let out = transform(&mut state)?;

        if state != before {
            self.save(&state)?;
            tracing::debug!(path = %self.path.display(), "store mutation committed");
        }
        Ok(out)
    }

    /// Create an empty queue for `key` if it does not exist yet.
    ///
    /// Returns `true` when the group was created, `false` when it was already
    /// registered (its queue is left untouched).
    pub fn register(&self, key: &str) -> Result<bool> {
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidGroupKey(key.to_string()));
        }

        let created = self.mutate(|state| Ok(state.ensure_group(key)))?;
        if created {
            tracing::info!(group = key, "group registered");
        } else {
            tracing::debug!(group = key, "group already registered");
        }
        Ok(created)
    }

    /// Registered group keys, sorted.
    pub fn registered_groups(&self) -> Result<Vec<String>> {
        Ok(self.load()?.group_keys())
    }

    fn save(&self, state: &StoreState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(state)
            .map_err(|e| Error::PersistenceError(format!("failed to encode snapshot: {e}")))?;

        let commit = Arc::new(Mutex::new(Commit::Pending));
        let (reply, rx) = mpsc::channel();
        self.tx
            .send(IoCmd::Save {
                bytes,
                commit: commit.clone(),
                reply,
            })
            .map_err(|_| Error::PersistenceError("store io thread stopped".to_string()))?;

        match rx.recv_timeout(self.io_timeout) {
            Ok(result) => {
                if let Err(e) = &result {
                    tracing::warn!(path = %self.path.display(), error = %e, "store save failed");
                }
                result
            }
            Err(RecvTimeoutError::Timeout) => {
                let mut c = commit.lock();
                if *c == Commit::Done {
                    // Renamed just as the wait expired.
                    return Ok(());
                }
                *c = Commit::Abandoned;
                tracing::warn!(path = %self.path.display(), timeout = ?self.io_timeout, "store save timed out, abandoned");
                Err(Error::PersistenceError(format!(
                    "save timed out after {:?}",
                    self.io_timeout
                )))
            }
            Err(RecvTimeoutError::Disconnected) => Err(Error::PersistenceError(
                "store io thread stopped".to_string(),
            )),
        }
    }
}
