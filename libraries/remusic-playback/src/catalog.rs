//! Ordered song catalog
//!
//! The catalog keeps tracks in insertion order with an id index alongside.
//! "Successor" is simply the next position in that order.

use crate::error::{PlaybackError, Result};
use rand::seq::IteratorRandom;
use rand::Rng;
use remusic_core::{CatalogSource, Track, TrackId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{info, warn};

/// Ordered set of tracks keyed by id
///
/// Invariants: no two tracks share an id, and iteration follows insertion
/// order. Removing a track keeps the relative order of the survivors.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Tracks in insertion order
    tracks: Vec<Track>,

    /// Position of each track in `tracks`
    index: HashMap<TrackId, usize>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from tracks in storage order
    ///
    /// # Errors
    /// Returns `DuplicateTrack` if two tracks share an id
    pub fn from_tracks(tracks: impl IntoIterator<Item = Track>) -> Result<Self> {
        let mut catalog = Self::new();
        for track in tracks {
            catalog.append(track)?;
        }
        Ok(catalog)
    }

    /// Append a track at the tail
    ///
    /// # Errors
    /// Returns `DuplicateTrack` if the id is already present. Uniqueness is
    /// guaranteed upstream, so this indicates corrupted input.
    pub fn append(&mut self, track: Track) -> Result<()> {
        if self.index.contains_key(&track.id) {
            warn!("Rejecting duplicate track id {}", track.id);
            return Err(PlaybackError::DuplicateTrack(track.id));
        }
        self.index.insert(track.id.clone(), self.tracks.len());
        self.tracks.push(track);
        Ok(())
    }

    /// Remove the track with this id, returning whether it was present
    pub fn remove(&mut self, id: &TrackId) -> bool {
        let Some(position) = self.index.remove(id) else {
            return false;
        };
        self.tracks.remove(position);

        // Shift the index of everything after the removed slot
        for track in &self.tracks[position..] {
            if let Some(slot) = self.index.get_mut(&track.id) {
                *slot -= 1;
            }
        }
        true
    }

    /// Find a track by id
    pub fn find(&self, id: &TrackId) -> Option<&Track> {
        self.index.get(id).map(|&position| &self.tracks[position])
    }

    /// Check whether a track id is present
    pub fn contains(&self, id: &TrackId) -> bool {
        self.index.contains_key(id)
    }

    /// All tracks in insertion order
    ///
    /// The iterator is restartable (`Clone`) and borrows this catalog, so it
    /// sees exactly the tracks present when it was created.
    pub fn all(&self) -> impl Iterator<Item = &Track> + Clone + '_ {
        self.tracks.iter()
    }

    /// The track right after `id` in catalog order
    ///
    /// Returns `None` if `id` is the last track or is not in the catalog.
    pub fn successor(&self, id: &TrackId) -> Option<&Track> {
        let position = *self.index.get(id)?;
        self.tracks.get(position + 1)
    }

    /// Tracks whose title or artist contains `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<&Track> {
        let query = query.to_lowercase();
        self.tracks
            .iter()
            .filter(|track| {
                track.title.to_lowercase().contains(&query)
                    || track.artist.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Random track whose genre contains `genre`, other than `exclude`
    pub fn random_by_genre<R: Rng + ?Sized>(
        &self,
        genre: &str,
        exclude: &TrackId,
        rng: &mut R,
    ) -> Option<&Track> {
        self.tracks
            .iter()
            .filter(|track| &track.id != exclude && track.matches_genre(genre))
            .choose(rng)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Process-wide catalog shared by all sessions
///
/// Readers take a cheap `Arc` snapshot. Reloads build a complete new catalog
/// before swapping the pointer, so a reader sees either the old or the new
/// catalog in full, never a partial rebuild. Reloads run one at a time, so
/// the last swap always reflects the latest store read.
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,

    /// Held across load, build and swap
    reload_lock: Mutex<()>,
}

impl CatalogHandle {
    /// Wrap an existing catalog
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
            reload_lock: Mutex::new(()),
        }
    }

    /// Build the initial catalog from the backing store
    pub fn load(source: &dyn CatalogSource) -> Result<Self> {
        let catalog = Catalog::from_tracks(source.load_tracks()?)?;
        info!("Catalog loaded with {} tracks", catalog.len());
        Ok(Self::new(catalog))
    }

    /// Current catalog snapshot
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Rebuild the catalog after the backing store changed
    ///
    /// On error the previous snapshot stays in place. Returns the new track count.
    pub fn reload(&self, source: &dyn CatalogSource) -> Result<usize> {
        let _reloading = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let catalog = Catalog::from_tracks(source.load_tracks()?)?;
        let count = catalog.len();

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(catalog);
        info!("Catalog reloaded with {} tracks", count);
        Ok(count)
    }
}
