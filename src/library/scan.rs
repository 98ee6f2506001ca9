use std::path::Path;

use walkdir::WalkDir;

use crate::config::IngestSettings;
use crate::error::{Error, Result};

use super::model::TrackRecord;
use super::tags::{is_accepted, read_track};

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Collect a [`TrackRecord`] for every accepted audio file under `dir`.
///
/// Records come back sorted by path so repeated imports of the same folder
/// append in the same order.
pub fn scan(dir: &Path, settings: &IngestSettings) -> Result<Vec<TrackRecord>> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    if !settings.recursive {
        walker = walker.max_depth(1);
    }

    let mut tracks: Vec<TrackRecord> = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|e| match e {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry during import");
                None
            }
        })
    {
        let path = entry.path();
        if !path.is_file() || !is_accepted(path, settings) {
            continue;
        }

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "UNKNOWN".to_string());
        tracks.push(read_track(path, &name));
    }

    Ok(tracks)
}
