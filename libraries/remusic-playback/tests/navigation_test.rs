//! End-to-end navigation tests
//!
//! Drive sessions through the public API against a `MemoryStore` and a
//! catalog snapshot, the way a request handler would.

use remusic_core::{PlaylistId, Track, TrackId, UserId};
use remusic_playback::{
    CatalogHandle, MemoryStore, PlaybackSession, SessionRegistry, TrackSelector, TrackUpdate,
};

// ===== Helpers =====

fn track(id: &str, genre: &str) -> Track {
    Track::new(id, format!("Song {}", id))
        .with_artist("Test Artist")
        .with_genre(genre)
}

fn store_with(tracks: &[(&str, &str)]) -> MemoryStore {
    let store = MemoryStore::with_seed(1234);
    for (id, genre) in tracks {
        store.add_track(track(id, genre)).unwrap();
    }
    store
}

fn session() -> PlaybackSession {
    PlaybackSession::new(UserId::new("alice@example.com"))
}

fn current_id(session: &PlaybackSession) -> Option<String> {
    session.current_track().map(|t| t.id.to_string())
}

fn history_ids(session: &PlaybackSession) -> Vec<String> {
    session.history().iter().map(|t| t.id.to_string()).collect()
}

fn play(
    session: &mut PlaybackSession,
    handle: &CatalogHandle,
    id: &str,
    playlist: Option<PlaylistId>,
) {
    let track = handle.snapshot().find(&TrackId::new(id)).cloned().unwrap();
    session.play(track, playlist);
}

// ===== Scenarios =====

#[test]
fn genre_scenario_picks_only_matching_track() {
    // Catalog = [A(Rock), B(Pop), C(Rock)], current = A, library context
    let store = store_with(&[("A", "Rock"), ("B", "Pop"), ("C", "Rock")]);
    let handle = CatalogHandle::load(&store).unwrap();
    let mut session = session();
    play(&mut session, &handle, "A", None);

    let snapshot = handle.snapshot();
    let selector = TrackSelector::new(&snapshot, &store, &store);
    let next = session.advance(&selector).unwrap();

    assert_eq!(next.id.as_str(), "C");
    assert_eq!(current_id(&session).as_deref(), Some("C"));
    assert_eq!(history_ids(&session), vec!["A"]);
}

#[test]
fn queue_scenario_serves_queued_track() {
    // queue = [X], current = A
    let store = store_with(&[("A", "Rock"), ("X", "Jazz")]);
    let handle = CatalogHandle::load(&store).unwrap();
    let mut session = session();
    play(&mut session, &handle, "A", None);
    session.enqueue_manual(handle.snapshot().find(&TrackId::new("X")).cloned().unwrap());

    let snapshot = handle.snapshot();
    let selector = TrackSelector::new(&snapshot, &store, &store);
    let next = session.advance(&selector).unwrap();

    assert_eq!(next.id.as_str(), "X");
    assert_eq!(current_id(&session).as_deref(), Some("X"));
    assert_eq!(history_ids(&session), vec!["A"]);
    assert!(session.queue().is_empty());
}

#[test]
fn queue_preempts_playlist_context() {
    let store = store_with(&[("p1", "Rock"), ("p2", "Rock"), ("x", "Jazz")]);
    let playlist = store.create_playlist(UserId::new("alice@example.com"), "Mix");
    store.add_to_playlist(playlist.id, &TrackId::new("p1")).unwrap();
    store.add_to_playlist(playlist.id, &TrackId::new("p2")).unwrap();
    let handle = CatalogHandle::load(&store).unwrap();

    let mut session = session();
    play(&mut session, &handle, "p1", Some(playlist.id));
    session.enqueue_manual(track("x", "Jazz"));

    let snapshot = handle.snapshot();
    let selector = TrackSelector::new(&snapshot, &store, &store);
    assert_eq!(session.advance(&selector).unwrap().id.as_str(), "x");

    // Queue drained: playlist context is still active, but "x" is not a member
    assert!(session.advance(&selector).is_none());
    assert_eq!(session.active_playlist(), Some(playlist.id));
}

#[test]
fn playlist_walks_in_order_and_stops_at_end() {
    let store = store_with(&[("a", "Rock"), ("b", "Rock"), ("c", "Rock"), ("d", "Rock")]);
    let playlist = store.create_playlist(UserId::new("alice@example.com"), "Mix");
    for id in ["c", "a", "d"] {
        store.add_to_playlist(playlist.id, &TrackId::new(id)).unwrap();
    }
    let handle = CatalogHandle::load(&store).unwrap();
    let snapshot = handle.snapshot();
    let selector = TrackSelector::new(&snapshot, &store, &store);

    let mut session = session();
    play(&mut session, &handle, "c", Some(playlist.id));

    assert_eq!(session.advance(&selector).unwrap().id.as_str(), "a");
    assert_eq!(session.advance(&selector).unwrap().id.as_str(), "d");

    // Last track: no loop, no genre fallback even though genres match
    assert!(session.advance(&selector).is_none());
    assert_eq!(current_id(&session).as_deref(), Some("d"));
    assert_eq!(history_ids(&session), vec!["a", "c"]);
}

#[test]
fn library_falls_back_to_catalog_order() {
    let store = store_with(&[("a", "Rock"), ("b", "Pop"), ("c", "Jazz")]);
    let handle = CatalogHandle::load(&store).unwrap();
    let snapshot = handle.snapshot();
    let selector = TrackSelector::new(&snapshot, &store, &store);

    let mut session = session();
    play(&mut session, &handle, "a", None);

    assert_eq!(session.advance(&selector).unwrap().id.as_str(), "b");
    assert_eq!(session.advance(&selector).unwrap().id.as_str(), "c");

    // End of catalog with no genre match
    assert!(session.advance(&selector).is_none());
    assert_eq!(current_id(&session).as_deref(), Some("c"));
    assert_eq!(history_ids(&session), vec!["b", "a"]);
}

#[test]
fn genre_pick_never_returns_current() {
    let store = store_with(&[("a", "Rock"), ("b", "Rock"), ("c", "Rock, Indie"), ("d", "Pop")]);
    let handle = CatalogHandle::load(&store).unwrap();
    let snapshot = handle.snapshot();
    let selector = TrackSelector::new(&snapshot, &store, &store);

    let mut session = session();
    play(&mut session, &handle, "a", None);

    for _ in 0..30 {
        let before = current_id(&session).unwrap();
        let next = session.advance(&selector).unwrap();
        assert_ne!(next.id.as_str(), before);
        assert!(next.genre.contains("Rock"));
    }
}

#[test]
fn rewind_after_two_advances_restores_middle_track() {
    let store = store_with(&[("a", "Rock"), ("b", "Pop"), ("c", "Jazz")]);
    let handle = CatalogHandle::load(&store).unwrap();
    let snapshot = handle.snapshot();
    let selector = TrackSelector::new(&snapshot, &store, &store);

    let mut session = session();
    play(&mut session, &handle, "a", None);
    session.advance(&selector).unwrap();
    session.advance(&selector).unwrap();

    assert_eq!(session.rewind(&selector).unwrap().id.as_str(), "b");
    assert_eq!(session.rewind(&selector).unwrap().id.as_str(), "a");
    assert!(session.rewind(&selector).is_none());
}

#[test]
fn playlist_rewind_after_history_runs_out() {
    let store = store_with(&[("a", "Rock"), ("b", "Rock"), ("c", "Rock")]);
    let playlist = store.create_playlist(UserId::new("alice@example.com"), "Mix");
    for id in ["a", "b", "c"] {
        store.add_to_playlist(playlist.id, &TrackId::new(id)).unwrap();
    }
    let handle = CatalogHandle::load(&store).unwrap();
    let snapshot = handle.snapshot();
    let selector = TrackSelector::new(&snapshot, &store, &store);

    // Jump straight to the last playlist entry
    let mut session = session();
    play(&mut session, &handle, "c", Some(playlist.id));

    assert_eq!(session.rewind(&selector).unwrap().id.as_str(), "b");
    assert_eq!(session.rewind(&selector).unwrap().id.as_str(), "a");
    assert!(session.rewind(&selector).is_none());
    assert!(session.history().is_empty());
}

#[test]
fn reload_after_store_change_is_visible_to_navigation() {
    let store = store_with(&[("a", "Rock"), ("b", "Pop")]);
    let handle = CatalogHandle::load(&store).unwrap();
    let mut session = session();
    play(&mut session, &handle, "a", None);

    // Admin retags "b" as Rock and adds "c"
    store
        .update_track(
            &TrackId::new("b"),
            TrackUpdate {
                title: "Song b".to_string(),
                artist: "Test Artist".to_string(),
                genre: "Rock".to_string(),
                duration_ms: None,
                image: None,
            },
        )
        .unwrap();
    store.add_track(track("c", "Jazz")).unwrap();
    assert_eq!(handle.reload(&store).unwrap(), 3);

    let snapshot = handle.snapshot();
    let selector = TrackSelector::new(&snapshot, &store, &store);
    let next = session.advance(&selector).unwrap();
    assert_eq!(next.id.as_str(), "b");
    assert_eq!(next.genre, "Rock");

    // Deleting the current track leaves the session on it, with no successor
    store.delete_track(&TrackId::new("a")).unwrap();
    store.delete_track(&TrackId::new("b")).unwrap();
    handle.reload(&store).unwrap();
    let snapshot = handle.snapshot();
    let selector = TrackSelector::new(&snapshot, &store, &store);
    assert!(session.advance(&selector).is_none());
    assert_eq!(current_id(&session).as_deref(), Some("b"));
}

#[test]
fn registry_sessions_navigate_independently() {
    let store = store_with(&[("a", "Rock"), ("b", "Pop"), ("c", "Jazz")]);
    let handle = CatalogHandle::load(&store).unwrap();
    let registry = SessionRegistry::default();

    let alice = registry.get_or_create(&UserId::new("alice@example.com"));
    let bob = registry.get_or_create(&UserId::new("bob@example.com"));

    let snapshot = handle.snapshot();
    let selector = TrackSelector::new(&snapshot, &store, &store);

    {
        let mut alice = alice.lock().unwrap();
        play(&mut alice, &handle, "a", None);
        alice.advance(&selector).unwrap();
    }
    {
        let mut bob = bob.lock().unwrap();
        play(&mut bob, &handle, "c", None);
        assert!(bob.advance(&selector).is_none());
    }

    assert_eq!(current_id(&alice.lock().unwrap()).as_deref(), Some("b"));
    assert_eq!(current_id(&bob.lock().unwrap()).as_deref(), Some("c"));
}
