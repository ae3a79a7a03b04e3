//! Next/previous track selection
//!
//! `next` consults its sources in a fixed priority order and stops at the
//! first one that yields a track:
//!
//! 1. Manual queue
//! 2. Active playlist (strictly sequential, never loops)
//! 3. Library context: random same-genre track, then catalog successor
//!
//! `prev` pops history first and otherwise steps back inside the active
//! playlist.

use crate::catalog::Catalog;
use crate::session::PlaybackSession;
use crate::types::NextSource;
use remusic_core::{GenreLookup, PlaylistLookup, Track, TrackId};
use tracing::debug;

/// Track selection over one catalog snapshot and its lookup collaborators
///
/// Cheap to build; construct one per navigation request.
#[derive(Clone, Copy)]
pub struct TrackSelector<'a> {
    catalog: &'a Catalog,
    playlists: &'a dyn PlaylistLookup,
    genres: &'a dyn GenreLookup,
}

impl<'a> TrackSelector<'a> {
    /// Create a selector
    pub fn new(
        catalog: &'a Catalog,
        playlists: &'a dyn PlaylistLookup,
        genres: &'a dyn GenreLookup,
    ) -> Self {
        Self {
            catalog,
            playlists,
            genres,
        }
    }

    /// Advance `session`, returning the new current track
    pub(crate) fn next(&self, session: &mut PlaybackSession) -> Option<Track> {
        if let Some(track) = session.take_queued() {
            return Some(commit(session, track, NextSource::Queue));
        }

        let (track, source) = self.pick_next(session)?;
        Some(commit(session, track, source))
    }

    /// Choose the next track from playlist or library context (queue excluded)
    fn pick_next(&self, session: &PlaybackSession) -> Option<(Track, NextSource)> {
        let current = session.current_track()?;

        if let Some(playlist_id) = session.active_playlist() {
            let tracks = self.playlists.playlist_tracks(&playlist_id);
            let next = position_of(&tracks, &current.id).and_then(|i| tracks.get(i + 1));
            if next.is_none() {
                debug!(
                    "Playlist {} has no track after {}, staying put",
                    playlist_id, current.id
                );
            }
            return next.map(|track| (track.clone(), NextSource::Playlist));
        }

        if let Some(track) = self
            .genres
            .random_track_by_genre(&current.genre, &current.id)
        {
            return Some((track, NextSource::Genre));
        }

        self.catalog
            .successor(&current.id)
            .map(|track| (track.clone(), NextSource::CatalogOrder))
    }

    /// Rewind `session`, returning the new current track
    pub(crate) fn prev(&self, session: &mut PlaybackSession) -> Option<Track> {
        if let Some(track) = session.step_back() {
            debug!("{} went back to {} from history", session.user(), track.id);
            return Some(track);
        }

        let playlist_id = session.active_playlist()?;
        let current = session.current_track()?;
        let tracks = self.playlists.playlist_tracks(&playlist_id);
        let position = position_of(&tracks, &current.id)?;
        let previous = tracks.get(position.checked_sub(1)?)?.clone();

        // Earlier playlist entries were never pushed to history, so none is popped or pushed here
        debug!(
            "{} stepped back to {} in playlist {}",
            session.user(),
            previous.id,
            playlist_id
        );
        session.replace_current(previous.clone());
        Some(previous)
    }
}

/// Make `track` current, logging where it came from
fn commit(session: &mut PlaybackSession, track: Track, source: NextSource) -> Track {
    debug!("{} advanced to {} via {}", session.user(), track.id, source);
    session.move_to(track.clone());
    track
}

fn position_of(tracks: &[Track], id: &TrackId) -> Option<usize> {
    tracks.iter().position(|track| &track.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use remusic_core::{PlaylistId, UserId};
    use std::collections::HashMap;

    /// Deterministic lookups: playlists by id, genre picks take the first match
    #[derive(Default)]
    struct Lookups {
        playlists: HashMap<PlaylistId, Vec<Track>>,
        genre_pool: Vec<Track>,
    }

    impl PlaylistLookup for Lookups {
        fn playlist_tracks(&self, playlist_id: &PlaylistId) -> Vec<Track> {
            self.playlists.get(playlist_id).cloned().unwrap_or_default()
        }
    }

    impl GenreLookup for Lookups {
        fn random_track_by_genre(&self, genre: &str, exclude: &TrackId) -> Option<Track> {
            self.genre_pool
                .iter()
                .find(|t| &t.id != exclude && t.matches_genre(genre))
                .cloned()
        }
    }

    fn track(id: &str, genre: &str) -> Track {
        Track::new(id, format!("Track {}", id)).with_genre(genre)
    }

    fn current_id(session: &PlaybackSession) -> Option<&str> {
        session.current_track().map(|t| t.id.as_str())
    }

    fn history_ids(session: &PlaybackSession) -> Vec<&str> {
        session.history().iter().map(|t| t.id.as_str()).collect()
    }

    fn session() -> PlaybackSession {
        PlaybackSession::new(UserId::new("u"))
    }

    #[test]
    fn idle_session_does_nothing() {
        let catalog = Catalog::from_tracks(vec![track("a", "Rock")]).unwrap();
        let lookups = Lookups::default();
        let selector = TrackSelector::new(&catalog, &lookups, &lookups);

        let mut session = session();
        assert!(session.advance(&selector).is_none());
        assert!(session.rewind(&selector).is_none());
        assert!(session.current_track().is_none());
    }

    #[test]
    fn queue_serves_even_without_current() {
        let catalog = Catalog::new();
        let lookups = Lookups::default();
        let selector = TrackSelector::new(&catalog, &lookups, &lookups);

        let mut session = session();
        session.enqueue_manual(track("x", "Jazz"));

        assert_eq!(session.advance(&selector).unwrap().id.as_str(), "x");
        assert_eq!(current_id(&session), Some("x"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn queue_keeps_playlist_context() {
        let catalog = Catalog::new();
        let lookups = Lookups::default();
        let selector = TrackSelector::new(&catalog, &lookups, &lookups);

        let mut session = session();
        session.play(track("a", "Rock"), Some(PlaylistId::new(9)));
        session.enqueue_manual(track("x", "Jazz"));
        session.advance(&selector);

        assert_eq!(session.active_playlist(), Some(PlaylistId::new(9)));
    }

    #[test]
    fn playlist_context_without_match_stays_put() {
        let catalog = Catalog::from_tracks(vec![track("a", "Rock"), track("b", "Rock")]).unwrap();
        let mut lookups = Lookups::default();
        lookups
            .playlists
            .insert(PlaylistId::new(1), vec![track("b", "Rock")]);
        lookups.genre_pool = vec![track("b", "Rock")];
        let selector = TrackSelector::new(&catalog, &lookups, &lookups);

        // Current track is not a member of the playlist: no genre or catalog fallback
        let mut session = session();
        session.play(track("a", "Rock"), Some(PlaylistId::new(1)));

        assert!(session.advance(&selector).is_none());
        assert_eq!(current_id(&session), Some("a"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn playlist_prev_steps_back_without_history() {
        let catalog = Catalog::new();
        let mut lookups = Lookups::default();
        lookups.playlists.insert(
            PlaylistId::new(1),
            vec![track("p1", "Rock"), track("p2", "Rock"), track("p3", "Rock")],
        );
        let selector = TrackSelector::new(&catalog, &lookups, &lookups);

        let mut session = session();
        session.play(track("p3", "Rock"), Some(PlaylistId::new(1)));

        assert_eq!(session.rewind(&selector).unwrap().id.as_str(), "p2");
        assert_eq!(session.rewind(&selector).unwrap().id.as_str(), "p1");
        assert!(session.rewind(&selector).is_none());
        assert_eq!(current_id(&session), Some("p1"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn library_prev_without_history_is_noop() {
        let catalog = Catalog::from_tracks(vec![track("a", "Rock")]).unwrap();
        let lookups = Lookups::default();
        let selector = TrackSelector::new(&catalog, &lookups, &lookups);

        let mut session = session();
        session.play(track("a", "Rock"), None);

        assert!(session.rewind(&selector).is_none());
        assert_eq!(current_id(&session), Some("a"));
    }

    #[test]
    fn rewind_from_history_leaves_queue_and_context() {
        let catalog = Catalog::new();
        let lookups = Lookups::default();
        let selector = TrackSelector::new(&catalog, &lookups, &lookups);

        let mut session = session();
        session.play(track("a", "Rock"), None);
        session.play(track("b", "Rock"), Some(PlaylistId::new(4)));
        session.enqueue_manual(track("q", "Pop"));

        assert_eq!(session.rewind(&selector).unwrap().id.as_str(), "a");
        assert_eq!(session.active_playlist(), Some(PlaylistId::new(4)));
        assert_eq!(session.queue().len(), 1);
        assert!(history_ids(&session).is_empty());
    }

    #[test]
    fn removed_current_track_has_no_successor() {
        let catalog = Catalog::from_tracks(vec![track("b", "Pop")]).unwrap();
        let lookups = Lookups::default();
        let selector = TrackSelector::new(&catalog, &lookups, &lookups);

        // "a" was deleted from the catalog after it started playing
        let mut session = session();
        session.play(track("a", "Rock"), None);

        assert!(session.advance(&selector).is_none());
        assert_eq!(current_id(&session), Some("a"));
    }
}
