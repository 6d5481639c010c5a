//! MusicBrainz API integration
//!
//! Supplies the ordered album tracklist the lyrics collaborator aligns its
//! lyric blocks to.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API

pub mod dto;
mod adapter;
mod client;

pub use adapter::TracklistEntry;
pub use client::{DEFAULT_BASE_URL, MusicBrainzClient};
