use serde::{Deserialize, Serialize};

/// Artist recorded when a file carries no usable artist tag.
pub const UNKNOWN_ARTIST: &str = "Unknown";

/// One ingested audio file.
///
/// Defaults are applied once, when the record is built; stored records are
/// never re-derived. Fields are private so a record cannot change after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    #[serde(rename = "file")]
    location: String,
    title: String,
    #[serde(default = "unknown_artist")]
    artist: String,
}

fn unknown_artist() -> String {
    UNKNOWN_ARTIST.to_string()
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

impl TrackRecord {
    /// Build a record, falling back to `fallback_title` when `title` is blank
    /// and to [`UNKNOWN_ARTIST`] when `artist` is blank.
    pub fn new(
        location: impl Into<String>,
        title: Option<&str>,
        artist: Option<&str>,
        fallback_title: &str,
    ) -> Self {
        Self {
            location: location.into(),
            title: non_blank(title).unwrap_or(fallback_title).to_string(),
            artist: non_blank(artist).unwrap_or(UNKNOWN_ARTIST).to_string(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }
}
