//! Test utilities and fixtures for album-data tests.
//!
//! Builders for provider responses plus a ready-made catalogue for the
//! "Wild Child" scenario used across the pipeline tests.
//!
//! # Example
//!
//! ```ignore
//! use album_data::test_utils::{album, listing};
//!
//! let expectations = album("Wild Child", "Expectations", "alb-exp");
//! let tracks = listing("exp", 10);
//! ```

use crate::model::{Album, AudioFeatures, Track};
use crate::providers::domain::{LyricBlock, TrackListing};

/// An album as the listing service would return it.
pub fn album(artist: &str, name: &str, id: &str) -> Album {
    Album {
        artist: artist.to_string(),
        album_name: name.to_string(),
        album_id: id.to_string(),
    }
}

/// `count` tracks titled "Song 1".. with uris `spotify:track:{prefix}-{n}`.
pub fn listing(prefix: &str, count: u32) -> Vec<TrackListing> {
    (1..=count)
        .map(|n| TrackListing {
            track_title: format!("Song {n}"),
            track_uri: track_uri(prefix, n),
        })
        .collect()
}

pub fn track_uri(prefix: &str, n: u32) -> String {
    format!("spotify:track:{prefix}-{n}")
}

/// A numbered track row.
pub fn track(album_name: &str, title: &str, uri: &str, track_n: u32) -> Track {
    Track {
        album_name: album_name.to_string(),
        track_title: title.to_string(),
        track_uri: uri.to_string(),
        track_n,
    }
}

/// Plausible audio features for a uri.
pub fn features(uri: &str) -> AudioFeatures {
    AudioFeatures {
        track_uri: uri.to_string(),
        danceability: 0.62,
        energy: 0.48,
        key: 5,
        loudness: -8.1,
        mode: 1,
        speechiness: 0.04,
        acousticness: 0.33,
        instrumentalness: 0.0,
        liveness: 0.12,
        valence: 0.71,
        tempo: 112.0,
        duration_ms: 205_000,
        time_signature: 4,
    }
}

/// One lyric block per track, positions 1..=count, text "{album} lyrics {n}".
pub fn lyric_blocks(album_name: &str, count: u32) -> Vec<LyricBlock> {
    (1..=count)
        .map(|n| LyricBlock {
            // Lyrics providers spell titles their own way
            track_title: format!("SONG {n} (Lyrics)"),
            position: n,
            text: Some(format!("{album_name} lyrics {n}")),
        })
        .collect()
}

pub fn block(title: &str, position: u32, text: Option<&str>) -> LyricBlock {
    LyricBlock {
        track_title: title.to_string(),
        position,
        text: text.map(String::from),
    }
}
