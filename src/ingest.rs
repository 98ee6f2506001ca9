//! Broadcast-append of new tracks to group queues.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::library::TrackRecord;
use crate::store::{PlaylistStore, StoreState};


/// Fans new tracks out to group queues in a single store transaction.
#[derive(Clone)]
pub struct IngestGateway {
    store: Arc<PlaylistStore>,
}

/// Append every track to every group in `groups`, or fail without touching
/// `state` at all.
fn append_all(state: &mut StoreState, tracks: &[TrackRecord], groups: &[String]) -> Result<usize> {
    if groups.is_empty() {
        return Err(Error::NoGroupsRegistered);
    }
    if let Some(missing) = groups.iter().find(|g| !state.contains(g)) {
        return Err(Error::UnknownGroup(missing.clone()));
    }

    let mut appended = 0;
    for group in groups {
        if let Some(queue) = state.group_mut(group) {
            for track in tracks {
                queue.push_back(track.clone());
            }
            appended += 1;
        }
    }
    Ok(appended)
}

fn dedup(groups: &[String]) -> Vec<String> {
    let mut keys: Vec<String> = groups.to_vec();
    keys.sort();
    keys.dedup();
    keys
}

impl IngestGateway {
    pub fn new(store: Arc<PlaylistStore>) -> Self {
        Self { store }
    }

    /// Append `track` to each queue in `groups` atomically and return how many
    /// queues received it.
    ///
    /// Fails with [`Error::NoGroupsRegistered`] for an empty set and with
    /// [`Error::UnknownGroup`] if any key is not registered; in both cases no
    /// queue changes.
    pub fn broadcast_append(&self, track: TrackRecord, groups: &[String]) -> Result<usize> {
        self.broadcast_append_many(std::slice::from_ref(&track), groups)
    }

    /// Batch form of [`broadcast_append`](Self::broadcast_append): all
    /// `tracks`, in order, to all `groups`, in one transaction.
    pub fn broadcast_append_many(&self, tracks: &[TrackRecord], groups: &[String]) -> Result<usize> {
        let groups = dedup(groups);
        let count = self
            .store
            .mutate(|state| append_all(state, tracks, &groups))?;
        tracing::info!(tracks = tracks.len(), groups = count, "broadcast appended");
        Ok(count)
    }

    /// Append `track` to every registered group. The set of groups is read in
    /// the same transaction as the append.
    pub fn broadcast_to_registered(&self, track: TrackRecord) -> Result<usize> {
        self.broadcast_many_to_registered(std::slice::from_ref(&track))
    }

    /// Append `tracks` to every registered group in one transaction.
    pub fn broadcast_many_to_registered(&self, tracks: &[TrackRecord]) -> Result<usize> {
        let count = self.store.mutate(|state| {
            let groups = state.group_keys();
            append_all(state, tracks, &groups)
        })?;
        tracing::info!(tracks = tracks.len(), groups = count, "broadcast to all registered groups");
        Ok(count)
    }
}
