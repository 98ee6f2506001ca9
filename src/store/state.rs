//! In-memory shape of the durable snapshot.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::library::TrackRecord;

/// Ordered tracks for one group. The head is "up next".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupQueue {
    tracks: VecDeque<TrackRecord>,
}

impl GroupQueue {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn head(&self) -> Option<&TrackRecord> {
        self.tracks.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackRecord> {
        self.tracks.iter()
    }

    /// Owned copy of the current order.
    pub fn to_vec(&self) -> Vec<TrackRecord> {
        self.tracks.iter().cloned().collect()
    }

    pub(crate) fn push_back(&mut self, track: TrackRecord) {
        self.tracks.push_back(track);
    }

    /// Move the head to the tail. Queues of 0 or 1 tracks are left as is.
    pub(crate) fn rotate(&mut self) {
        if self.tracks.len() > 1 {
            self.tracks.rotate_left(1);
        }
    }
}

/// Every registered group and its queue.
///
/// Serialized as a plain JSON object `{ "<group key>": [track, ...], ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreState {
    groups: BTreeMap<String, GroupQueue>,
}

impl StoreState {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    pub fn group(&self, key: &str) -> Option<&GroupQueue> {
        self.groups.get(key)
    }

    pub(crate) fn group_mut(&mut self, key: &str) -> Option<&mut GroupQueue> {
        self.groups.get_mut(key)
    }

    /// Registered keys in sorted order.
    pub fn group_keys(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    /// Insert an empty queue for `key` unless one exists. Returns whether a
    /// queue was created.
    pub(crate) fn ensure_group(&mut self, key: &str) -> bool {
        if self.groups.contains_key(key) {
            return false;
        }
        self.groups.insert(key.to_string(), GroupQueue::default());
        true
    }
}
