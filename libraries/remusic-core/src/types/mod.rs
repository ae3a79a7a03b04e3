mod ids;
mod playlist;
mod track;

pub use ids::{PlaylistId, TrackId, UserId};
pub use playlist::Playlist;
pub use track::{format_duration, parse_duration, Track};
