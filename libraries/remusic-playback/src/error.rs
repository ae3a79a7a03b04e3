//! Error types for playback navigation

use remusic_core::{CoreError, TrackId};
use thiserror::Error;

/// Playback errors
///
/// Navigation itself never fails: unknown ids and empty stacks surface as
/// `None`. Errors are reserved for broken invariants and store failures.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// A track id was inserted into the catalog twice
    #[error("Duplicate track in catalog: {0}")]
    DuplicateTrack(TrackId),

    /// Collaborator (store) error
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
