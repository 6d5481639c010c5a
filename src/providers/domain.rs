//! Internal domain models shared by all providers.
//!
//! These types are OUR types - they don't change when external APIs change.
//! Every provider response is converted into them by that provider's adapter.

use serde::{Deserialize, Serialize};

/// One entry of an album's track listing, in provider order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackListing {
    pub track_title: String,
    /// Provider-unique track id
    pub track_uri: String,
}

/// A raw block of lyrics as returned by a lyrics provider.
///
/// A track may span several blocks. `position` is the provider's own
/// numbering inside the response and is never used as a join key directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricBlock {
    pub track_title: String,
    pub position: u32,
    pub text: Option<String>,
}

/// Pipeline stage a provider miss happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissStage {
    Tracks,
    Lyrics,
}

impl std::fmt::Display for MissStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tracks => write!(f, "tracks"),
            Self::Lyrics => write!(f, "lyrics"),
        }
    }
}

/// A recoverable per-album failure.
///
/// The album contributes an empty result for the stage; the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMiss {
    pub stage: MissStage,
    pub album_name: String,
    pub reason: String,
}

impl ProviderMiss {
    pub fn new(stage: MissStage, album_name: impl Into<String>, error: &ProviderError) -> Self {
        Self {
            stage,
            album_name: album_name.into(),
            reason: error.to_string(),
        }
    }
}

/// Errors that can occur while talking to a provider
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_miss_keeps_reason() {
        let miss = ProviderMiss::new(
            MissStage::Lyrics,
            "Expectations",
            &ProviderError::NotFound("release".to_string()),
        );
        assert_eq!(miss.stage, MissStage::Lyrics);
        assert!(miss.reason.contains("release"));
    }

    #[test]
    fn test_miss_stage_serializes_snake_case() {
        let json = serde_json::to_string(&MissStage::Tracks).unwrap();
        assert_eq!(json, "\"tracks\"");
    }
}
