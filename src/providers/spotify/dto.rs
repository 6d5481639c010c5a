//! Spotify Web API Data Transfer Objects
//!
//! These types match what the Spotify Web API returns for the endpoints we
//! call. DO NOT use them outside the spotify module - convert to domain
//! types in the adapter.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api

use serde::{Deserialize, Serialize};

/// Client-credentials token response (`POST /api/token`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: u64,
}

/// Generic paging wrapper used by list endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Absolute URL of the next page, if any
    pub next: Option<String>,
    #[serde(default)]
    pub total: u32,
}

/// `GET /search?type=artist`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistSearchResponse {
    pub artists: Paging<Artist>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// Simplified album (`GET /artists/{id}/albums`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimplifiedAlbum {
    pub id: String,
    pub name: String,
    /// album, single, compilation
    pub album_type: Option<String>,
    pub release_date: Option<String>,
    pub total_tracks: Option<u32>,
}

/// Simplified track (`GET /albums/{id}/tracks`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimplifiedTrack {
    pub id: Option<String>,
    pub name: String,
    /// `spotify:track:<id>`
    pub uri: String,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub duration_ms: Option<u64>,
}

/// `GET /audio-features?ids=...`
///
/// Unknown ids come back as `null` entries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioFeaturesResponse {
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeatures>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioFeatures {
    pub id: String,
    pub uri: String,
    pub danceability: f32,
    pub energy: f32,
    pub key: i32,
    pub loudness: f32,
    pub mode: i32,
    pub speechiness: f32,
    pub acousticness: f32,
    pub instrumentalness: f32,
    pub liveness: f32,
    pub valence: f32,
    pub tempo: f32,
    pub duration_ms: u64,
    pub time_signature: i32,
}

/// Error envelope returned by the Web API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// ============================================================================
