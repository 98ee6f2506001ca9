use std::path::Path;
use std::sync::Arc;

use crate::config::StoreSettings;
use crate::library::TrackRecord;
use crate::store::PlaylistStore;

pub(crate) fn store_settings(dir: &Path) -> StoreSettings {
    StoreSettings {
        path: dir.join("songs.json"),
        lock_timeout_ms: 5_000,
        io_timeout_ms: 5_000,
    }
}

pub(crate) fn open_store(dir: &Path) -> Arc<PlaylistStore> {
    PlaylistStore::open_shared(&store_settings(dir)).unwrap()
}

pub(crate) fn track(title: &str, artist: &str) -> TrackRecord {
    TrackRecord::new(format!("/music/{title}.mp3"), Some(title), Some(artist), title)
}

pub(crate) fn titles(tracks: &[TrackRecord]) -> Vec<&str> {
    tracks.iter().map(|t| t.title()).collect()
}
