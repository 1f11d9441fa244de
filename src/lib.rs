//! VibeFlow - mood based playlist discovery
//!
//! This library wires the Spotify catalog client into an HTTP API that maps
//! moods to playlist searches and keeps an in-memory list of favorites.

pub mod error;
pub mod favorites;
pub mod mood;
pub mod playlists;
pub mod server;
