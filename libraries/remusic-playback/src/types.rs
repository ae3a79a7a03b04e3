//! Core types for playback navigation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a `next` decision took its track from
///
/// Sources are consulted strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextSource {
    /// Manual queue (explicit user intent)
    Queue,

    /// Following element of the active playlist
    Playlist,

    /// Random pick among same-genre catalog tracks
    Genre,

    /// Structural successor in catalog order
    CatalogOrder,
}

impl fmt::Display for NextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NextSource::Queue => "queue",
            NextSource::Playlist => "playlist",
            NextSource::Genre => "genre",
            NextSource::CatalogOrder => "catalog-order",
        };
        f.write_str(name)
    }
}

/// Configuration for playback sessions and the in-memory store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Maximum history size (default: unbounded)
    pub history_limit: Option<usize>,

    /// Seed for same-genre random picks (default: entropy)
    pub shuffle_seed: Option<u64>,
}
