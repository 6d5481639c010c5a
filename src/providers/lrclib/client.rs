//! LRCLIB HTTP client
//!
//! Looks up the lyrics of a single track by artist, title and album.
//! See: https://lrclib.net/docs

use std::time::Duration;

use tracing::debug;

use super::dto;
use crate::providers::domain::ProviderError;

pub const DEFAULT_BASE_URL: &str = "https://lrclib.net";

/// LRCLIB API client
pub struct LrclibClient {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl LrclibClient {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        // LRCLIB asks clients to identify themselves
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Plain lyrics for one track, `None` when LRCLIB has no text for it
    pub async fn track_lyrics(
        &self,
        artist: &str,
        track_title: &str,
        album_name: &str,
    ) -> Result<Option<String>, ProviderError> {
        let url = format!("{}/api/get", self.base_url);
        debug!(artist, track_title, album_name, "LRCLIB request");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("artist_name", artist),
                ("track_name", track_title),
                ("album_name", album_name),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(ProviderError::ApiError(error.message));
            }
            return Err(ProviderError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let record: dto::LyricsRecord = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(plain_text(&record))
    }
}

/// Prefer plain lyrics; fall back to synced lyrics with timestamps removed.
fn plain_text(record: &dto::LyricsRecord) -> Option<String> {
    if record.instrumental {
        return None;
    }

    let plain = record.plain_lyrics.as_deref().unwrap_or_default().trim();
    if !plain.is_empty() {
        return Some(plain.to_string());
    }

    let synced = record.synced_lyrics.as_deref().unwrap_or_default();
    let text = synced
        .lines()
        .map(strip_timestamps)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    (!text.is_empty()).then_some(text)
}

/// `[00:17.12] [00:42.00]Some line` -> `Some line`
fn strip_timestamps(line: &str) -> &str {
    let mut rest = line.trim();
    while let Some(stripped) = rest.strip_prefix('[') {
        match stripped.find(']') {
            Some(end) => rest = stripped[end + 1..].trim_start(),
            None => break,
        }
    }
    rest.trim_end()
}
