//! The playlist being curated and its `.m3u8` serializer.

pub mod m3u;
mod model;

pub use m3u::{SaveError, write_playlist};
pub use model::Playlist;
