//! Core data model for the album dataset.
//!
//! Each pipeline stage produces one of these tables:
//! - [`Album`] - Album Resolver
//! - [`Track`] - Track Enumerator
//! - [`AudioFeatures`] - Audio Feature Fetcher
//! - [`LyricsEntry`] - Lyrics Fetcher
//! - [`AlbumData`] - Merge Engine (final output)
//!
//! Tables are plain `Vec`s that move from stage to stage and are never
//! edited after hand-off.

use serde::{Deserialize, Serialize};

use crate::providers::ProviderMiss;

/// An album released by an artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Artist name as requested
    pub artist: String,
    /// Album name as the provider spells it
    pub album_name: String,
    /// Provider-assigned album id (needed to list its tracks)
    pub album_id: String,
}

impl Album {
    /// Logical key: `(artist, lowercase(album_name))`.
    pub fn key(&self) -> (String, String) {
        (self.artist.to_lowercase(), self.album_name.to_lowercase())
    }
}

/// A track on an album, numbered by its position in the provider listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub album_name: String,
    pub track_title: String,
    /// Provider-unique track id
    pub track_uri: String,
    /// 1-based, contiguous per album
    pub track_n: u32,
}

/// Measured audio attributes for one track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub track_uri: String,
    pub danceability: f32,
    pub energy: f32,
    /// Pitch class (0 = C), -1 if no key was detected
    pub key: i32,
    /// Overall loudness in dB
    pub loudness: f32,
    /// 1 = major, 0 = minor
    pub mode: i32,
    pub speechiness: f32,
    pub acousticness: f32,
    pub instrumentalness: f32,
    pub liveness: f32,
    pub valence: f32,
    /// Estimated tempo in BPM
    pub tempo: f32,
    pub duration_ms: u64,
    pub time_signature: i32,
}

/// Lyrics for one track slot of an album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsEntry {
    pub album_name: String,
    pub track_n: u32,
    /// `None` when the provider knows the slot but has no text for it
    pub lyrics: Option<String>,
}

/// One row of the final table: a track, left-extended with its audio
/// features and lyrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumDataRow {
    pub album_name: String,
    pub track_title: String,
    pub track_uri: String,
    pub track_n: u32,
    #[serde(default)]
    pub features: Option<AudioFeatures>,
    #[serde(default)]
    pub lyrics: Option<String>,
}

/// Final per-track dataset for an artist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumData {
    pub artist: String,
    pub rows: Vec<AlbumDataRow>,
    /// Albums whose tracks or lyrics could not be fetched
    pub misses: Vec<ProviderMiss>,
    /// RFC 3339 timestamp of when the run finished
    pub generated_at: String,
}

/// Row counts for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlbumDataSummary {
    pub rows: usize,
    pub with_features: usize,
    pub with_lyrics: usize,
    pub misses: usize,
}

impl AlbumData {
    /// Count rows, joined fields, and provider misses.
    pub fn summary(&self) -> AlbumDataSummary {
        AlbumDataSummary {
            rows: self.rows.len(),
            with_features: self.rows.iter().filter(|r| r.features.is_some()).count(),
            with_lyrics: self.rows.iter().filter(|r| r.lyrics.is_some()).count(),
            misses: self.misses.len(),
        }
    }

    /// Rows belonging to one album (case-insensitive), in output order.
    pub fn album_rows<'a>(&'a self, album_name: &'a str) -> impl Iterator<Item = &'a AlbumDataRow> {
        let wanted = album_name.to_lowercase();
        self.rows
            .iter()
            .filter(move |r| r.album_name.to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MissStage;

    fn row(album: &str, n: u32, features: bool, lyrics: bool) -> AlbumDataRow {
        AlbumDataRow {
            album_name: album.to_string(),
            track_title: format!("Song {n}"),
            track_uri: format!("uri:{album}:{n}"),
            track_n: n,
            features: features.then(|| AudioFeatures {
                track_uri: format!("uri:{album}:{n}"),
                danceability: 0.5,
                energy: 0.5,
                key: 1,
                loudness: -6.0,
                mode: 1,
                speechiness: 0.05,
                acousticness: 0.1,
                instrumentalness: 0.0,
                liveness: 0.1,
                valence: 0.4,
                tempo: 120.0,
                duration_ms: 200_000,
                time_signature: 4,
            }),
            lyrics: lyrics.then(|| "la la".to_string()),
        }
    }

    #[test]
    fn test_album_key_is_case_insensitive() {
        let a = Album {
            artist: "Wild Child".to_string(),
            album_name: "Expectations".to_string(),
            album_id: "1".to_string(),
        };
        let b = Album {
            artist: "WILD CHILD".to_string(),
            album_name: "EXPECTATIONS".to_string(),
            album_id: "2".to_string(),
        };
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_summary_counts() {
        let data = AlbumData {
            artist: "Wild Child".to_string(),
            rows: vec![row("A", 1, true, true), row("A", 2, false, true), row("B", 1, true, false)],
            misses: vec![ProviderMiss {
                stage: MissStage::Lyrics,
                album_name: "B".to_string(),
                reason: "not found".to_string(),
            }],
            generated_at: String::new(),
        };

        let summary = data.summary();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.with_features, 2);
        assert_eq!(summary.with_lyrics, 2);
        assert_eq!(summary.misses, 1);
    }

    #[test]
    fn test_album_rows_filter() {
        let data = AlbumData {
            artist: "x".to_string(),
            rows: vec![row("Alpha", 1, false, false), row("Beta", 1, false, false)],
            misses: vec![],
            generated_at: String::new(),
        };
        assert_eq!(data.album_rows("ALPHA").count(), 1);
    }

    #[test]
    fn test_row_serializes_missing_fields_as_null() {
        let json = serde_json::to_value(row("A", 1, false, false)).unwrap();
        assert!(json["features"].is_null());
        assert!(json["lyrics"].is_null());
        assert_eq!(json["track_n"], 1);
    }
}
