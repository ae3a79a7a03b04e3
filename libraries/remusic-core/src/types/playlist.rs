/// Playlist domain type
use crate::types::{PlaylistId, TrackId, UserId};
use serde::{Deserialize, Serialize};

/// User playlist
///
/// Holds membership only; track metadata is resolved against the catalog when
/// the playlist is listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Owner user ID
    pub owner: UserId,

    /// Playlist name
    pub name: String,

    /// Member tracks in playlist order (no duplicates)
    #[serde(default)]
    pub track_ids: Vec<TrackId>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(id: PlaylistId, owner: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            owner,
            name: name.into(),
            track_ids: Vec::new(),
        }
    }

    /// Add a track at the end
    ///
    /// Returns `false` (and leaves the playlist unchanged) if the track is already a member.
    pub fn add(&mut self, track_id: TrackId) -> bool {
        if self.contains(&track_id) {
            return false;
        }
        self.track_ids.push(track_id);
        true
    }

    /// Remove a track, returning whether it was a member
    pub fn remove(&mut self, track_id: &TrackId) -> bool {
        let before = self.track_ids.len();
        self.track_ids.retain(|id| id != track_id);
        self.track_ids.len() != before
    }

    /// Check membership
    pub fn contains(&self, track_id: &TrackId) -> bool {
        self.track_ids.contains(track_id)
    }
}
