//! Interactive command shell
//!
//! Maps one line of input to one operation on the store, the shared catalog
//! or the logged-in user's playback session. Unknown ids are reported as
//! errors before any session is touched.

use crate::error::{CliError, Result};
use remusic_core::types::parse_duration;
use remusic_core::{CoreError, Playlist, PlaylistId, PlaylistLookup, Track, TrackId, UserId};
use remusic_playback::{
    CatalogHandle, MemoryStore, PlaybackConfig, SessionRegistry, SharedSession, TrackSelector,
    TrackUpdate,
};
use std::time::Duration;
use std::sync::PoisonError;
use tracing::{debug, info};

const HELP: &str = "\
Commands:
  tracks                          list the catalog
  search <text>                   search titles and artists
  login <email>                   switch user
  play <track> [playlist]         play a track, optionally in a playlist
  queue <track>                   queue a track to play next
  next | prev                     skip forward or back
  now                             show the current track
  upcoming                        show the manual queue
  history                         show recently played tracks
  playlists [text]                list your playlists
  playlist <id>                   show a playlist
  new-playlist <name>             create a playlist
  playlist-add <id> <track>       add a track to a playlist
  playlist-remove <id> <track>    remove a track from a playlist
  add <title> | <artist> | <genre> [| <m:ss>]
                                  add a track to the store
  edit <track> <title> | <artist> | <genre> [| <m:ss>]
                                  edit a track's metadata
  delete <track>                  delete a track from the store
  help | quit";

/// Result of executing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Output to print (may be empty)
    Text(String),
    /// Leave the shell
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Tracks,
    Search(String),
    Login(UserId),
    Play {
        track: TrackId,
        playlist: Option<PlaylistId>,
    },
    Queue(TrackId),
    Next,
    Prev,
    Now,
    Upcoming,
    History,
    Playlists(Option<String>),
    Playlist(PlaylistId),
    NewPlaylist(String),
    PlaylistAdd(PlaylistId, TrackId),
    PlaylistRemove(PlaylistId, TrackId),
    Add(TrackFields),
    Edit(TrackId, TrackFields),
    Delete(TrackId),
    Help,
    Quit,
}

impl Command {
    /// Parse a line; blank lines yield `None`
    fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match name {
            "" => return Ok(None),
            "tracks" => Self::Tracks,
            "search" if !rest.is_empty() => Self::Search(rest.to_string()),
            "search" => return Err(CliError::Usage("search <text>")),
            "login" => match args.as_slice() {
                [email] => Self::Login(UserId::new(*email)),
                _ => return Err(CliError::Usage("login <email>")),
            },
            "play" => match args.as_slice() {
                [track] => Self::Play {
                    track: TrackId::new(*track),
                    playlist: None,
                },
                [track, playlist] => Self::Play {
                    track: TrackId::new(*track),
                    playlist: Some(parse_playlist_id(playlist, "play <track> [playlist]")?),
                },
                _ => return Err(CliError::Usage("play <track> [playlist]")),
            },
            "queue" => match args.as_slice() {
                [track] => Self::Queue(TrackId::new(*track)),
                _ => return Err(CliError::Usage("queue <track>")),
            },
            "next" => Self::Next,
            "prev" => Self::Prev,
            "now" => Self::Now,
            "upcoming" => Self::Upcoming,
            "history" => Self::History,
            "playlists" if rest.is_empty() => Self::Playlists(None),
            "playlists" => Self::Playlists(Some(rest.to_string())),
            "playlist" => match args.as_slice() {
                [id] => Self::Playlist(parse_playlist_id(id, "playlist <id>")?),
                _ => return Err(CliError::Usage("playlist <id>")),
            },
            "new-playlist" if !rest.is_empty() => Self::NewPlaylist(rest.to_string()),
            "new-playlist" => return Err(CliError::Usage("new-playlist <name>")),
            "playlist-add" => match args.as_slice() {
                [id, track] => Self::PlaylistAdd(
                    parse_playlist_id(id, "playlist-add <id> <track>")?,
                    TrackId::new(*track),
                ),
                _ => return Err(CliError::Usage("playlist-add <id> <track>")),
            },
            "playlist-remove" => match args.as_slice() {
                [id, track] => Self::PlaylistRemove(
                    parse_playlist_id(id, "playlist-remove <id> <track>")?,
                    TrackId::new(*track),
                ),
                _ => return Err(CliError::Usage("playlist-remove <id> <track>")),
            },
            "add" => Self::Add(TrackFields::parse(rest).ok_or(CliError::Usage(ADD_USAGE))?),
            "edit" => match rest.split_once(char::is_whitespace) {
                Some((track, fields)) => Self::Edit(
                    TrackId::new(track),
                    TrackFields::parse(fields).ok_or(CliError::Usage(EDIT_USAGE))?,
                ),
                None => return Err(CliError::Usage(EDIT_USAGE)),
            },
            "delete" => match args.as_slice() {
                [track] => Self::Delete(TrackId::new(*track)),
                _ => return Err(CliError::Usage("delete <track>")),
            },
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

const ADD_USAGE: &str = "add <title> | <artist> | <genre> [| <m:ss>]";
const EDIT_USAGE: &str = "edit <track> <title> | <artist> | <genre> [| <m:ss>]";

/// Track metadata given as `title | artist | genre [| m:ss]`
#[derive(Debug, Clone, PartialEq, Eq)]
struct TrackFields {
    title: String,
    artist: String,
    genre: String,
    duration: Option<Duration>,
}

impl TrackFields {
    /// `None` on a missing title, wrong field count or bad duration
    fn parse(text: &str) -> Option<Self> {
        let fields: Vec<&str> = text.split('|').map(str::trim).collect();
        let (title, artist, genre, duration) = match fields.as_slice() {
            [title, artist, genre] => (*title, *artist, *genre, None),
            [title, artist, genre, duration] => {
                (*title, *artist, *genre, Some(parse_duration(duration)?))
            }
            _ => return None,
        };
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title: title.to_string(),
            artist: artist.to_string(),
            genre: genre.to_string(),
            duration,
        })
    }
}

fn parse_playlist_id(value: &str, usage: &'static str) -> Result<PlaylistId> {
    value
        .parse::<i64>()
        .map(PlaylistId::new)
        .map_err(|_| CliError::Usage(usage))
}

/// Shell state: one store, one shared catalog and every user's session
pub struct Shell {
    store: MemoryStore,
    catalog: CatalogHandle,
    sessions: SessionRegistry,
    user: Option<UserId>,
}

impl Shell {
    /// Build the catalog from `store` and start with nobody logged in
    pub fn new(store: MemoryStore, config: &PlaybackConfig) -> Result<Self> {
        let catalog = CatalogHandle::load(&store)?;
        Ok(Self {
            store,
            catalog,
            sessions: SessionRegistry::new(config.clone()),
            user: None,
        })
    }

    /// Log in as `user` before the first command
    #[must_use]
    pub fn with_user(mut self, user: UserId) -> Self {
        self.login(user);
        self
    }

    /// Currently logged-in user
    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// Backing store
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Parse and run one line of input
    pub fn execute(&mut self, line: &str) -> Result<Reply> {
        let Some(command) = Command::parse(line)? else {
            return Ok(Reply::Text(String::new()));
        };
        debug!("Executing {:?}", command);

        let text = match command {
            Command::Quit => return Ok(Reply::Quit),
            Command::Help => HELP.to_string(),
            Command::Tracks => {
                let catalog = self.catalog.snapshot();
                list_tracks(catalog.all(), "Catalog is empty")
            }
            Command::Search(query) => {
                let catalog = self.catalog.snapshot();
                list_tracks(catalog.search(&query), "No matching tracks")
            }
            Command::Login(user) => {
                self.login(user.clone());
                format!("Logged in as {}", user)
            }
            Command::Play { track, playlist } => self.play(&track, playlist)?,
            Command::Queue(track) => {
                let track = self.catalog_track(&track)?;
                self.session()?
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .enqueue_manual(track.clone());
                format!("Queued {}", describe(&track))
            }
            Command::Next => self.step(true)?,
            Command::Prev => self.step(false)?,
            Command::Now => {
                let session = self.session()?;
                let session = session.lock().unwrap_or_else(PoisonError::into_inner);
                match session.current_track() {
                    Some(track) => match session.active_playlist() {
                        Some(playlist) => {
                            format!("Now playing: {} (playlist {})", describe(track), playlist)
                        }
                        None => format!("Now playing: {}", describe(track)),
                    },
                    None => "Nothing playing".to_string(),
                }
            }
            Command::Upcoming => {
                let session = self.session()?;
                let session = session.lock().unwrap_or_else(PoisonError::into_inner);
                list_tracks(session.queue(), "Queue is empty")
            }
            Command::History => {
                let session = self.session()?;
                let session = session.lock().unwrap_or_else(PoisonError::into_inner);
                list_tracks(session.history(), "History is empty")
            }
            Command::Playlists(search) => {
                let user = self.current_user()?;
                let playlists = self.store.user_playlists(user, search.as_deref());
                if playlists.is_empty() {
                    "No playlists".to_string()
                } else {
                    playlists
                        .iter()
                        .map(|p| format!("{:>4}  {} ({} tracks)", p.id, p.name, p.track_ids.len()))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            Command::Playlist(id) => {
                let playlist = self.owned_playlist(id)?;
                let tracks = self.store.playlist_tracks(&playlist.id);
                let mut out = format!("{} ({})\n", playlist.name, playlist.id);
                out.push_str(&list_tracks(tracks.iter(), "  (empty)"));
                out
            }
            Command::NewPlaylist(name) => {
                let owner = self.current_user()?.clone();
                let playlist = self.store.create_playlist(owner, name);
                format!("Created playlist {} ({})", playlist.name, playlist.id)
            }
            Command::PlaylistAdd(id, track) => {
                let playlist = self.owned_playlist(id)?;
                if self.store.add_to_playlist(playlist.id, &track)? {
                    format!("Added {} to {}", track, playlist.name)
                } else {
                    format!("{} is already in {}", track, playlist.name)
                }
            }
            Command::PlaylistRemove(id, track) => {
                let playlist = self.owned_playlist(id)?;
                if self.store.remove_from_playlist(playlist.id, &track)? {
                    format!("Removed {} from {}", track, playlist.name)
                } else {
                    format!("{} is not in {}", track, playlist.name)
                }
            }
            Command::Add(fields) => {
                let mut track = Track::new(TrackId::generate(), fields.title)
                    .with_artist(fields.artist)
                    .with_genre(fields.genre);
                if let Some(duration) = fields.duration {
                    track = track.with_duration(duration);
                }
                self.store.add_track(track.clone())?;
                let count = self.catalog.reload(&self.store)?;
                format!("Added {} ({} tracks)", describe(&track), count)
            }
            Command::Edit(id, fields) => {
                let existing = self
                    .store
                    .track(&id)
                    .ok_or_else(|| CoreError::not_found("Track", id.as_str()))?;
                let duration_ms = match fields.duration {
                    Some(duration) => Some(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)),
                    None => existing.duration_ms,
                };
                let track = self.store.update_track(
                    &id,
                    TrackUpdate {
                        title: fields.title,
                        artist: fields.artist,
                        genre: fields.genre,
                        duration_ms,
                        image: None,
                    },
                )?;
                self.catalog.reload(&self.store)?;
                format!("Updated {}", describe(&track))
            }
            Command::Delete(track) => {
                self.store.delete_track(&track)?;
                let count = self.catalog.reload(&self.store)?;
                format!("Deleted {} ({} tracks remain)", track, count)
            }
        };
        Ok(Reply::Text(text))
    }

    fn login(&mut self, user: UserId) {
        info!("Logged in as {}", user);
        self.sessions.get_or_create(&user);
        self.user = Some(user);
    }

    fn current_user(&self) -> Result<&UserId> {
        self.user.as_ref().ok_or(CliError::NotLoggedIn)
    }

    fn session(&self) -> Result<SharedSession> {
        let user = self.current_user()?;
        Ok(self.sessions.get_or_create(user))
    }

    fn catalog_track(&self, id: &TrackId) -> Result<Track> {
        self.catalog
            .snapshot()
            .find(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Track", id.as_str()).into())
    }

    /// Playlist owned by the current user; other users' playlists read as missing
    fn owned_playlist(&self, id: PlaylistId) -> Result<Playlist> {
        let user = self.current_user()?;
        self.store
            .playlist(id)
            .filter(|playlist| &playlist.owner == user)
            .ok_or_else(|| CoreError::not_found("Playlist", id.to_string()).into())
    }

    fn play(&self, id: &TrackId, playlist: Option<PlaylistId>) -> Result<String> {
        let session = self.session()?;
        let track = self.catalog_track(id)?;
        if let Some(playlist) = playlist {
            let playlist = self.owned_playlist(playlist)?;
            if !playlist.contains(id) {
                return Err(CoreError::invalid_input(format!(
                    "{} is not in playlist {}",
                    id, playlist.name
                ))
                .into());
            }
        }

        let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
        session.play(track.clone(), playlist);
        Ok(format!("Now playing: {}", describe(&track)))
    }

    fn step(&self, forward: bool) -> Result<String> {
        let session = self.session()?;
        let catalog = self.catalog.snapshot();
        let selector = TrackSelector::new(&catalog, &self.store, &self.store);

        let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
        let moved = if forward {
            session.advance(&selector)
        } else {
            session.rewind(&selector)
        };
        Ok(match moved {
            Some(track) => format!("Now playing: {}", describe(&track)),
            None if forward => "Nothing to play next".to_string(),
            None => "Nothing to go back to".to_string(),
        })
    }
}

/// One-line track summary
fn describe(track: &Track) -> String {
    if track.artist.is_empty() {
        format!("{} [{}]", track.title, track.id)
    } else {
        format!("{} - {} [{}]", track.title, track.artist, track.id)
    }
}

fn list_tracks<'a>(tracks: impl IntoIterator<Item = &'a Track>, empty: &str) -> String {
    let rows: Vec<String> = tracks
        .into_iter()
        .map(|track| {
            format!(
                "{:<10} {:<30} {:<20} {:<16} {}",
                track.id,
                track.title,
                track.artist,
                track.genre,
                track.duration_label()
            )
        })
        .collect();
    if rows.is_empty() {
        empty.to_string()
    } else {
        rows.join("\n")
    }
}
