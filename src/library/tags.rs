use std::path::Path;

use lofty::file::TaggedFileExt;
use lofty::tag::Accessor;

use crate::config::IngestSettings;
use crate::error::{Error, Result};

use super::model::TrackRecord;

/// Normalized accepted extensions: trimmed, no leading dot, lowercase.
pub(crate) fn accepted_extensions(settings: &IngestSettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Whether `name` (a file name or path) ends in one of the accepted extensions.
pub fn is_accepted(name: &Path, settings: &IngestSettings) -> bool {
    let exts = accepted_extensions(settings);

    name.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// File-type gate for uploads: [`Error::UnsupportedFileType`] unless
/// `file_name` passes [`is_accepted`].
pub fn ensure_accepted(file_name: &str, settings: &IngestSettings) -> Result<()> {
    if is_accepted(Path::new(file_name), settings) {
        return Ok(());
    }
    Err(Error::UnsupportedFileType {
        name: file_name.to_string(),
        accepted: accepted_extensions(settings),
    })
}

/// Build a [`TrackRecord`] for the audio file at `path`.
///
/// `original_name` is the name the file was uploaded under; it becomes the
/// title when the file has no title tag. Files lofty cannot read still produce
/// a record, with both defaults applied.
pub fn read_track(path: &Path, original_name: &str) -> TrackRecord {
    let mut title: Option<String> = None;
    let mut artist: Option<String> = None;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                title = tag.title().map(|v| v.to_string());
                artist = tag.artist().map(|v| v.to_string());
            }
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no readable tags, using defaults");
        }
    }

    TrackRecord::new(
        path.to_string_lossy(),
        title.as_deref(),
        artist.as_deref(),
        original_name,
    )
}
