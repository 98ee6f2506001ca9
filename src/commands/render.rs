//! Human-facing reply texts.

use crate::error::Error;
use crate::library::TrackRecord;

pub const SETUP_INSTRUCTIONS: &str = "📫 Send me `GroupID: <your_group_id>` to register a group.";
pub const SETUP_REJECTED: &str = "⛔ Only the admin can use this command in private.";
pub const NO_GROUPS: &str = "❗Please first send `GroupID: <your_group_id>`";
pub const PLAYLIST_EMPTY: &str = "🪫 Playlist is empty.";
pub const NO_SONGS: &str = "❌ No songs found for this group.";
pub const NO_SONGS_NOTICE: &str = "🪫 No songs found.";
pub const NOT_REGISTERED: &str = "❓ This group is not registered. Ask the admin to send its GroupID.";
pub const STORAGE_UNAVAILABLE: &str = "⚠️ Playlist storage is unavailable right now.";
pub const NOT_SAVED: &str = "⚠️ Could not save the change; nothing was modified.";
pub const BUSY: &str = "⏳ The playlist is busy, try again in a moment.";
pub const EMPTY_GROUP_ID: &str = "⛔ Group ID must not be empty.";

pub fn registered(key: &str, extensions: &[String]) -> String {
    format!(
        "✅ Group ID `{key}` registered. Now send me {} files!",
        extension_list(extensions)
    )
}

pub fn already_registered(key: &str) -> String {
    format!("✅ Group ID `{key}` is already registered; its playlist was kept.")
}

pub fn unsupported_file(extensions: &[String]) -> String {
    format!("⛔ Only {} files are allowed.", extension_list(extensions))
}

pub fn saved(track: &TrackRecord) -> String {
    format!("✅ Saved `{}` by `{}`.", track.title(), track.artist())
}

pub fn imported(tracks: usize, groups: usize) -> String {
    match tracks {
        0 => "📭 No audio files found to import.".to_string(),
        1 => format!("✅ Imported 1 track into {groups} group(s)."),
        n => format!("✅ Imported {n} tracks into {groups} group(s)."),
    }
}

pub fn not_a_directory(path: &std::path::Path) -> String {
    format!("⛔ `{}` is not a directory.", path.display())
}

/// Numbered listing, 1-based.
pub fn playlist(tracks: &[TrackRecord]) -> String {
    let lines: Vec<String> = tracks
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {} – {}", i + 1, t.title(), t.artist()))
        .collect();
    format!("🎵 Playlist:\n{}", lines.join("\n"))
}

/// `.mp3` or `.mp3/.ogg`
fn extension_list(extensions: &[String]) -> String {
    let exts: Vec<String> = extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{e}"))
        .collect();
    exts.join("/")
}

/// Reply for failures that are not specific to one command.
pub fn failure(err: &Error) -> String {
    match err {
        Error::UnknownGroup(_) => NOT_REGISTERED.to_string(),
        Error::EmptyPlaylist(_) => PLAYLIST_EMPTY.to_string(),
        Error::NoGroupsRegistered => NO_GROUPS.to_string(),
        Error::InvalidGroupKey(_) => EMPTY_GROUP_ID.to_string(),
        Error::StorageUnavailable(_) => STORAGE_UNAVAILABLE.to_string(),
        Error::PersistenceError(_) => NOT_SAVED.to_string(),
        Error::StoreBusy(_) => BUSY.to_string(),
        Error::UnsupportedFileType { accepted, .. } => unsupported_file(accepted),
        Error::NotADirectory(path) => not_a_directory(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_is_numbered_from_one() {
        let tracks = vec![
            TrackRecord::new("a.mp3", Some("A"), Some("X"), "a.mp3"),
            TrackRecord::new("b.mp3", Some("B"), None, "b.mp3"),
        ];
        assert_eq!(playlist(&tracks), "🎵 Playlist:\n1. A – X\n2. B – Unknown");
    }

    #[test]
    fn extension_lists_are_normalized() {
        assert_eq!(unsupported_file(&["mp3".into()]), "⛔ Only .mp3 files are allowed.");
        assert_eq!(
            registered("100", &[".MP3".into(), "ogg".into()]),
            "✅ Group ID `100` registered. Now send me .mp3/.ogg files!"
        );
    }

    #[test]
    fn unsupported_file_failure_lists_accepted_types() {
        let err = Error::UnsupportedFileType {
            name: "notes.txt".into(),
            accepted: vec!["mp3".into()],
        };
        assert_eq!(failure(&err), "⛔ Only .mp3 files are allowed.");
    }

    #[test]
    fn distinct_failures_get_distinct_texts() {
        let unknown = failure(&Error::UnknownGroup("1".into()));
        let empty = failure(&Error::EmptyPlaylist("1".into()));
        let no_groups = failure(&Error::NoGroupsRegistered);
        assert_ne!(unknown, empty);
        assert_ne!(empty, no_groups);
        assert_ne!(unknown, no_groups);
    }
}
