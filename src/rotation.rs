//! Round-robin rotation over one group's queue.
//!
//! Queue states per group: unregistered -> empty (register) -> non-empty
//! (append). Rotation only permutes a non-empty queue; nothing here removes
//! tracks or groups.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::library::TrackRecord;
use crate::store::{GroupQueue, PlaylistStore, StoreState};

#[cfg(test)]
mod tests;

/// Rotation engine. Cheap to clone; all state lives in the [`PlaylistStore`].
#[derive(Clone)]
pub struct Rotation {
    store: Arc<PlaylistStore>,
}

fn queue<'a>(state: &'a StoreState, group: &str) -> Result<&'a GroupQueue> {
    state
        .group(group)
        .ok_or_else(|| Error::UnknownGroup(group.to_string()))
}

impl Rotation {
    pub fn new(store: Arc<PlaylistStore>) -> Self {
        Self { store }
    }

    /// Append `track` to the tail of `group`'s queue and return the new length.
    pub fn append(&self, group: &str, track: TrackRecord) -> Result<usize> {
        self.store.mutate(|state| {
            let queue = state
                .group_mut(group)
                .ok_or_else(|| Error::UnknownGroup(group.to_string()))?;
            queue.push_back(track);
            Ok(queue.len())
        })
    }

    /// Head of the queue without changing it; `None` for an empty playlist.
    pub fn peek_current(&self, group: &str) -> Result<Option<TrackRecord>> {
        let state = self.store.load()?;
        Ok(queue(&state, group)?.head().cloned())
    }

    /// Rotate the queue left by one and return the new head.
    ///
    /// An empty queue yields `None`; a single-track queue is left as is and
    /// its only track is returned. Neither case is an error.
    pub fn advance(&self, group: &str) -> Result<Option<TrackRecord>> {
        let head = self.store.mutate(|state| {
            let queue = state
                .group_mut(group)
                .ok_or_else(|| Error::UnknownGroup(group.to_string()))?;
            queue.rotate();
            Ok(queue.head().cloned())
        })?;
        tracing::debug!(group, next = head.as_ref().map(|t| t.title()), "advanced");
        Ok(head)
    }

    /// Full playback order as an owned snapshot (may be empty).
    pub fn list(&self, group: &str) -> Result<Vec<TrackRecord>> {
        let state = self.store.load()?;
        Ok(queue(&state, group)?.to_vec())
    }

    /// Like [`list`](Self::list) but reports an empty queue as
    /// [`Error::EmptyPlaylist`].
    pub fn list_nonempty(&self, group: &str) -> Result<Vec<TrackRecord>> {
        let tracks = self.list(group)?;
        if tracks.is_empty() {
            return Err(Error::EmptyPlaylist(group.to_string()));
        }
        Ok(tracks)
    }
}
