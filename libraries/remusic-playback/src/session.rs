//! Per-user playback session
//!
//! Holds the current track, the active playlist context and the two
//! navigation structures. Only `play`, `enqueue_manual`, `advance` and
//! `rewind` change that state.

use crate::history::History;
use crate::queue::Queue;
use crate::selector::TrackSelector;
use crate::types::PlaybackConfig;
use remusic_core::{PlaylistId, Track, UserId};

/// Playback and navigation state of one user
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    /// Owning user
    user: UserId,

    /// Track currently playing
    current_track: Option<Track>,

    /// Playlist being followed (None = library/general context)
    active_playlist: Option<PlaylistId>,

    /// Previously current tracks
    history: History<Track>,

    /// Manually queued tracks
    queue: Queue<Track>,
}

impl PlaybackSession {
    /// Create an idle session with unbounded history
    pub fn new(user: UserId) -> Self {
        Self::with_config(user, &PlaybackConfig::default())
    }

    /// Create an idle session using `config`
    pub fn with_config(user: UserId, config: &PlaybackConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => History::with_limit(limit),
            None => History::new(),
        };

        Self {
            user,
            current_track: None,
            active_playlist: None,
            history,
            queue: Queue::new(),
        }
    }

    // ===== State transitions =====

    /// Start playing `track` explicitly
    ///
    /// The previous track (if any) goes to history. `playlist` becomes the new
    /// navigation context; `None` switches to library mode. The caller resolves
    /// the track id beforehand and never calls this for an unknown id.
    pub fn play(&mut self, track: Track, playlist: Option<PlaylistId>) {
        self.move_to(track);
        self.active_playlist = playlist;
    }

    /// Add a track to the end of the manual queue
    pub fn enqueue_manual(&mut self, track: Track) {
        self.queue.enqueue(track);
    }

    /// Move to the next track
    ///
    /// Returns the new current track, or `None` if nothing changed.
    pub fn advance(&mut self, selector: &TrackSelector<'_>) -> Option<Track> {
        selector.next(self)
    }

    /// Move back to the previous track
    ///
    /// Returns the new current track, or `None` if nothing changed.
    pub fn rewind(&mut self, selector: &TrackSelector<'_>) -> Option<Track> {
        selector.prev(self)
    }

    // ===== Read accessors =====

    /// Owning user
    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Track currently playing
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Playlist being followed, `None` in library context
    pub fn active_playlist(&self) -> Option<PlaylistId> {
        self.active_playlist
    }

    /// Manual queue, soonest first
    pub fn queue(&self) -> Vec<&Track> {
        self.queue.peek_all()
    }

    /// Play history, most recent first
    pub fn history(&self) -> Vec<&Track> {
        self.history.peek_all()
    }

    // ===== Selector plumbing =====

    pub(crate) fn take_queued(&mut self) -> Option<Track> {
        self.queue.dequeue()
    }

    /// Make `track` current, pushing the old current track to history
    pub(crate) fn move_to(&mut self, track: Track) {
        if let Some(previous) = self.current_track.replace(track) {
            self.history.push(previous);
        }
    }

    /// Pop history into the current slot
    pub(crate) fn step_back(&mut self) -> Option<Track> {
        let track = self.history.pop()?;
        self.current_track = Some(track.clone());
        Some(track)
    }

    /// Replace the current track without touching history
    pub(crate) fn replace_current(&mut self, track: Track) {
        self.current_track = Some(track);
    }
}
