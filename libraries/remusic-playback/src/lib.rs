//! ReMusic - Playback Navigation
//!
//! In-process catalog traversal and per-user playback state for ReMusic.
//!
//! This crate provides:
//! - Ordered catalog with id lookup and catalog-order successor
//! - Atomic catalog snapshots, rebuilt wholesale on every store change
//! - Per-user play history (stack) and manual queue (FIFO)
//! - "Smart next/prev": queue -> playlist -> same genre -> catalog order
//! - Session registry keyed by user
//! - In-memory store implementing the lookup collaborators
//!
//! # Architecture
//!
//! `remusic-playback` never touches storage, HTTP or templates:
//! - Playlist membership and genre picks arrive through `remusic_core` traits
//! - Request handlers own the mapping from requests to session operations
//!
//! # Example: Smart Next
//!
//! ```rust
//! use remusic_core::{Track, UserId};
//! use remusic_playback::{CatalogHandle, MemoryStore, PlaybackSession, TrackSelector};
//!
//! let store = MemoryStore::with_seed(1);
//! store.add_track(Track::new("a", "Song A").with_genre("Rock")).unwrap();
//! store.add_track(Track::new("b", "Song B").with_genre("Pop")).unwrap();
//! store.add_track(Track::new("c", "Song C").with_genre("Rock")).unwrap();
//!
//! let catalog = CatalogHandle::load(&store).unwrap();
//! let snapshot = catalog.snapshot();
//! let selector = TrackSelector::new(&snapshot, &store, &store);
//!
//! let mut session = PlaybackSession::new(UserId::new("alice@example.com"));
//! let first = snapshot.find(&"a".into()).unwrap().clone();
//! session.play(first, None);
//!
//! // Only "c" shares the Rock genre with "a"
//! let next = session.advance(&selector).unwrap();
//! assert_eq!(next.id.as_str(), "c");
//!
//! // And back again
//! let prev = session.rewind(&selector).unwrap();
//! assert_eq!(prev.id.as_str(), "a");
//! ```
//!
//! # Example: Manual Queue
//!
//! ```rust
//! use remusic_core::{Track, UserId};
//! use remusic_playback::{Catalog, MemoryStore, PlaybackSession, TrackSelector};
//!
//! let store = MemoryStore::new();
//! let catalog = Catalog::new();
//! let selector = TrackSelector::new(&catalog, &store, &store);
//!
//! let mut session = PlaybackSession::new(UserId::new("bob@example.com"));
//! session.play(Track::new("a", "Song A"), None);
//! session.enqueue_manual(Track::new("x", "Requested"));
//!
//! assert_eq!(session.advance(&selector).unwrap().id.as_str(), "x");
//! assert_eq!(session.history()[0].id.as_str(), "a");
//! ```

mod catalog;
mod error;
mod history;
mod queue;
mod registry;
mod selector;
mod session;
mod store;
pub mod types;

// Public exports
pub use catalog::{Catalog, CatalogHandle};
pub use error::{PlaybackError, Result};
pub use history::History;
pub use queue::Queue;
pub use registry::{SessionRegistry, SharedSession};
pub use selector::TrackSelector;
pub use session::PlaybackSession;
pub use store::{MemoryStore, TrackUpdate};
pub use types::{NextSource, PlaybackConfig};
