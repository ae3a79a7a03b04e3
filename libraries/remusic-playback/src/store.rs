//! In-memory catalog store
//!
//! Implements the collaborator traits over plain in-memory tables, together
//! with the administrative operations (add/update/delete tracks, playlist
//! membership) a backing store offers. Every track change must be followed by
//! a `CatalogHandle::reload` so the shared catalog picks it up.

use crate::types::PlaybackConfig;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use remusic_core::{
    CatalogSource, CoreError, GenreLookup, Playlist, PlaylistId, PlaylistLookup, Result, Track,
    TrackId, UserId,
};
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Editable track fields
///
/// The album is fixed at upload time. A `None` image keeps the existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackUpdate {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub duration_ms: Option<u64>,
    pub image: Option<String>,
}

#[derive(Debug, Default)]
struct Tables {
    /// Tracks in storage order
    tracks: Vec<Track>,

    playlists: BTreeMap<PlaylistId, Playlist>,

    /// Last assigned playlist id
    last_playlist_id: i64,
}

impl Tables {
    fn track(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|track| &track.id == id)
    }

    fn playlist_mut(&mut self, id: PlaylistId) -> Result<&mut Playlist> {
        self.playlists
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found("Playlist", id.to_string()))
    }
}

/// Thread-safe in-memory store
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    rng: Mutex<StdRng>,
}

impl MemoryStore {
    /// Create an empty store with an entropy-seeded genre picker
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty store with a deterministic genre picker
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create an empty store honouring `config.shuffle_seed`
    pub fn from_config(config: &PlaybackConfig) -> Self {
        config.shuffle_seed.map_or_else(Self::new, Self::with_seed)
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            rng: Mutex::new(rng),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Tracks =====

    /// Insert a new track at the end of storage order
    pub fn add_track(&self, track: Track) -> Result<()> {
        let mut tables = self.write();
        if tables.track(&track.id).is_some() {
            return Err(CoreError::duplicate(format!("track {}", track.id)));
        }
        info!("Adding track {} ({})", track.id, track.title);
        tables.tracks.push(track);
        Ok(())
    }

    /// Update a track's editable fields, returning the updated track
    pub fn update_track(&self, id: &TrackId, update: TrackUpdate) -> Result<Track> {
        let mut tables = self.write();
        let track = tables
            .tracks
            .iter_mut()
            .find(|track| &track.id == id)
            .ok_or_else(|| CoreError::not_found("Track", id.as_str()))?;

        track.title = update.title;
        track.artist = update.artist;
        track.genre = update.genre;
        track.duration_ms = update.duration_ms;
        if update.image.is_some() {
            track.image = update.image;
        }
        info!("Updated track {}", id);
        Ok(track.clone())
    }

    /// Delete a track
    ///
    /// Playlist memberships of the track stay in place but are skipped when
    /// playlists are listed.
    pub fn delete_track(&self, id: &TrackId) -> Result<()> {
        let mut tables = self.write();
        let before = tables.tracks.len();
        tables.tracks.retain(|track| &track.id != id);
        if tables.tracks.len() == before {
            return Err(CoreError::not_found("Track", id.as_str()));
        }
        info!("Deleted track {}", id);
        Ok(())
    }

    /// Look up a single track
    pub fn track(&self, id: &TrackId) -> Option<Track> {
        self.read().track(id).cloned()
    }

    // ===== Playlists =====

    /// Create an empty playlist with the next free id
    pub fn create_playlist(&self, owner: UserId, name: impl Into<String>) -> Playlist {
        let mut tables = self.write();
        tables.last_playlist_id += 1;
        let playlist = Playlist::new(PlaylistId::new(tables.last_playlist_id), owner, name);
        info!("Created playlist {} ({})", playlist.id, playlist.name);
        tables.playlists.insert(playlist.id, playlist.clone());
        playlist
    }

    /// Insert a playlist with a fixed id (fixture loading)
    pub fn insert_playlist(&self, playlist: Playlist) -> Result<()> {
        let mut tables = self.write();
        if tables.playlists.contains_key(&playlist.id) {
            return Err(CoreError::duplicate(format!("playlist {}", playlist.id)));
        }
        tables.last_playlist_id = tables.last_playlist_id.max(playlist.id.get());
        tables.playlists.insert(playlist.id, playlist);
        Ok(())
    }

    /// Look up a playlist
    pub fn playlist(&self, id: PlaylistId) -> Option<Playlist> {
        self.read().playlists.get(&id).cloned()
    }

    /// Playlists owned by `owner`, optionally filtered by name (ignoring case)
    pub fn user_playlists(&self, owner: &UserId, search: Option<&str>) -> Vec<Playlist> {
        let search = search.map(str::to_lowercase);
        self.read()
            .playlists
            .values()
            .filter(|playlist| &playlist.owner == owner)
            .filter(|playlist| match &search {
                Some(query) => playlist.name.to_lowercase().contains(query.as_str()),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Add a track to a playlist
    ///
    /// Returns `false` if the track was already in the playlist.
    pub fn add_to_playlist(&self, playlist_id: PlaylistId, track_id: &TrackId) -> Result<bool> {
        let mut tables = self.write();
        if tables.track(track_id).is_none() {
            return Err(CoreError::not_found("Track", track_id.as_str()));
        }
        let added = tables.playlist_mut(playlist_id)?.add(track_id.clone());
        debug!("Add {} to playlist {}: {}", track_id, playlist_id, added);
        Ok(added)
    }

    /// Remove a track from a playlist, returning whether it was a member
    pub fn remove_from_playlist(&self, playlist_id: PlaylistId, track_id: &TrackId) -> Result<bool> {
        let mut tables = self.write();
        Ok(tables.playlist_mut(playlist_id)?.remove(track_id))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogSource for MemoryStore {
    fn load_tracks(&self) -> Result<Vec<Track>> {
        Ok(self.read().tracks.clone())
    }
}

impl PlaylistLookup for MemoryStore {
    fn playlist_tracks(&self, playlist_id: &PlaylistId) -> Vec<Track> {
        let tables = self.read();
        let Some(playlist) = tables.playlists.get(playlist_id) else {
            return Vec::new();
        };
        playlist
            .track_ids
            .iter()
            .filter_map(|id| tables.track(id).cloned())
            .collect()
    }
}

impl GenreLookup for MemoryStore {
    fn random_track_by_genre(&self, genre: &str, exclude: &TrackId) -> Option<Track> {
        let tables = self.read();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        tables
            .tracks
            .iter()
            .filter(|track| &track.id != exclude && track.matches_genre(genre))
            .choose(&mut *rng)
            .cloned()
    }
}
