//! Process-wide registry of playback sessions
//!
//! One session per user, created on first access after login. Sessions are
//! never evicted: the registry grows with the number of distinct users seen
//! by the process.

use crate::session::PlaybackSession;
use crate::types::PlaybackConfig;
use remusic_core::UserId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Session handle shared between the registry and request handlers
pub type SharedSession = Arc<Mutex<PlaybackSession>>;

/// Registry mapping users to their playback session
///
/// Only the map itself is locked here; each session has its own mutex, so
/// requests from different users never contend on session state.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<UserId, SharedSession>>,
    config: PlaybackConfig,
}

impl SessionRegistry {
    /// Create an empty registry; new sessions use `config`
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Get the user's session, creating it on first access
    pub fn get_or_create(&self, user: &UserId) -> SharedSession {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let session = sessions.entry(user.clone()).or_insert_with(|| {
            info!("Creating playback session for {}", user);
            Arc::new(Mutex::new(PlaybackSession::with_config(
                user.clone(),
                &self.config,
            )))
        });
        Arc::clone(session)
    }

    /// Get the user's session if one exists
    pub fn get(&self, user: &UserId) -> Option<SharedSession> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user)
            .map(Arc::clone)
    }

    /// Users with a session, sorted
    pub fn users(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        users.sort();
        users
    }

    /// Number of sessions
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if no session exists yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
