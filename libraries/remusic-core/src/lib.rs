//! ReMusic Core
//!
//! Domain types, traits, and error handling shared by the ReMusic crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist` and their identifiers
//! - **Collaborator Traits**: `PlaylistLookup`, `GenreLookup`, `CatalogSource`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! Storage backends implement the collaborator traits; the playback crate only
//! ever sees typed `Track` values coming out of them.
//!
//! # Example
//!
//! ```rust
//! use remusic_core::{Playlist, PlaylistId, Track, TrackId, UserId};
//!
//! let track = Track::new("a1", "Bohemian Rhapsody")
//!     .with_artist("Queen")
//!     .with_genre("Rock");
//! assert_eq!(track.id, TrackId::new("a1"));
//!
//! let mut playlist = Playlist::new(PlaylistId::new(1), UserId::new("alice@example.com"), "Road trip");
//! assert!(playlist.add(track.id.clone()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CoreError, Result};
pub use traits::{CatalogSource, GenreLookup, PlaylistLookup};
pub use types::{Playlist, PlaylistId, Track, TrackId, UserId};
