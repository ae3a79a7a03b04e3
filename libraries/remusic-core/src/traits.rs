/// Collaborator traits implemented by the storage layer
///
/// The playback core never talks to a database directly. Playlist membership,
/// genre picks and catalog reloads all arrive through these traits as typed
/// `Track` values.
use crate::error::Result;
use crate::types::{PlaylistId, Track, TrackId};

/// Ordered playlist membership lookup
pub trait PlaylistLookup: Send + Sync {
    /// Get the tracks of a playlist in playlist order
    ///
    /// The order must be stable across calls made during one navigation
    /// decision. An unknown playlist yields an empty list.
    fn playlist_tracks(&self, playlist_id: &PlaylistId) -> Vec<Track>;
}

/// Same-genre candidate lookup ("smart shuffle")
pub trait GenreLookup: Send + Sync {
    /// Pick a random track whose genre contains `genre` as a substring
    ///
    /// Matching is case-sensitive against the stored genre text. The track
    /// identified by `exclude` is never returned. Returns `None` when no other
    /// track matches.
    fn random_track_by_genre(&self, genre: &str, exclude: &TrackId) -> Option<Track>;
}

/// Source of the full track list used to rebuild the catalog
pub trait CatalogSource: Send + Sync {
    /// Load every track in storage order
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read
    fn load_tracks(&self) -> Result<Vec<Track>>;
}
