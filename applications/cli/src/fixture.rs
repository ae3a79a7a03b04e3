//! Catalog fixtures
//!
//! A fixture is a TOML file describing the tracks and playlists to seed the
//! in-memory store with:
//!
//! ```toml
//! [[tracks]]
//! id = "a1"
//! title = "Paranoid"
//! artist = "Black Sabbath"
//! genre = "Rock, Metal"
//! duration = "2:48"
//!
//! [[playlists]]
//! id = 1
//! owner = "alice@example.com"
//! name = "Road Trip"
//! tracks = ["a1"]
//! ```

use crate::error::{CliError, Result};
use remusic_core::types::parse_duration;
use remusic_core::{Playlist, PlaylistId, Track, TrackId, UserId};
use remusic_playback::{MemoryStore, PlaybackConfig};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub tracks: Vec<FixtureTrack>,

    #[serde(default)]
    pub playlists: Vec<FixturePlaylist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureTrack {
    /// Generated when omitted
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    pub album: Option<String>,
    #[serde(default)]
    pub genre: String,
    /// `m:ss` or `h:mm:ss`
    pub duration: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixturePlaylist {
    pub id: i64,
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<String>,
}

impl Fixture {
    /// Read and parse a fixture file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
            .map_err(|e| CliError::Fixture(format!("{}: {}", path.display(), e)))
    }

    /// Parse fixture text
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CliError::Fixture(e.to_string()))
    }

    /// Build a store holding the fixture's tracks and playlists
    pub fn into_store(self, config: &PlaybackConfig) -> Result<MemoryStore> {
        let store = MemoryStore::from_config(config);
        let track_count = self.tracks.len();
        let playlist_count = self.playlists.len();

        for entry in self.tracks {
            store.add_track(entry.into_track()?)?;
        }

        for entry in self.playlists {
            let mut playlist = Playlist::new(
                PlaylistId::new(entry.id),
                UserId::new(entry.owner),
                entry.name,
            );
            for id in entry.tracks {
                let id = TrackId::new(id);
                if store.track(&id).is_none() {
                    return Err(CliError::Fixture(format!(
                        "Playlist {} references unknown track {}",
                        playlist.id, id
                    )));
                }
                playlist.add(id);
            }
            store.insert_playlist(playlist)?;
        }

        info!(
            "Loaded fixture with {} tracks and {} playlists",
            track_count, playlist_count
        );
        Ok(store)
    }
}

impl FixtureTrack {
    fn into_track(self) -> Result<Track> {
        let id = self.id.map_or_else(TrackId::generate, TrackId::new);
        let mut track = Track::new(id, self.title)
            .with_artist(self.artist)
            .with_genre(self.genre);

        if let Some(album) = self.album {
            track = track.with_album(album);
        }
        if let Some(label) = self.duration {
            let duration = parse_duration(&label).ok_or_else(|| {
                CliError::Fixture(format!("Invalid duration {:?} for {}", label, track.id))
            })?;
            track = track.with_duration(duration);
        }
        if let Some(image) = self.image {
            track = track.with_image(image);
        }
        Ok(track)
    }
}
