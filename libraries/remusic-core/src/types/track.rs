/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Album name given to uploads that do not belong to an album
const DEFAULT_ALBUM: &str = "Single";

/// Catalog track
///
/// Immutable metadata record for one song. Sessions and the catalog hold
/// their own clones; nothing mutates a track after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Track duration in milliseconds
    pub duration_ms: Option<u64>,

    /// Genre text as stored (may list several genres, e.g. "Rock, Indie")
    pub genre: String,

    /// Cover image reference
    pub image: Option<String>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: String::new(),
            album: DEFAULT_ALBUM.to_string(),
            duration_ms: None,
            genre: String::new(),
            image: None,
        }
    }

    /// Set the artist
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set the album
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set the genre text
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// Set the duration
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Set the cover image reference
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }

    /// Duration formatted for display (`m:ss`), or `--:--` when unknown
    pub fn duration_label(&self) -> String {
        self.duration()
            .map_or_else(|| "--:--".to_string(), format_duration)
    }

    /// Check whether this track's genre text contains `genre`
    ///
    /// Case-sensitive substring match, so "Rock" matches "Rock, Indie" and
    /// "Hard Rock" but not "rock".
    pub fn matches_genre(&self, genre: &str) -> bool {
        self.genre.contains(genre)
    }
}

/// Format a duration as `m:ss` (or `h:mm:ss` past one hour)
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Parse an `m:ss` or `h:mm:ss` label into a duration
///
/// Returns `None` for anything else, including seconds or minutes >= 60 in a
/// non-leading position and totals that overflow `u64` seconds.
pub fn parse_duration(label: &str) -> Option<Duration> {
    let parts: Vec<&str> = label.trim().split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let mut total: u64 = 0;
    for (i, part) in parts.iter().enumerate() {
        let value: u64 = part.parse().ok()?;
        if i > 0 && value >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(value)?;
    }
    Some(Duration::from_secs(total))
}
