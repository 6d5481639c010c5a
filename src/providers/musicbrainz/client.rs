//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.
//! All requests from one client pass through a shared gate, so concurrent
//! album tasks still respect the limit.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::adapter::{self, TracklistEntry};
use super::dto;
use crate::providers::domain::ProviderError;

pub const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2";

/// User agent string - MusicBrainz requires this
const USER_AGENT: &str = concat!(
    "AlbumData/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/album-data)"
);

/// Minimum spacing between requests
const MIN_INTERVAL: Duration = Duration::from_millis(1100);

/// Hands out request slots at least `interval` apart.
pub(crate) struct RequestGate {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestGate {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Reserve the next free slot and sleep until it arrives.
    pub(crate) async fn wait(&self) {
        let slot = {
            let mut next = self.next_slot.lock();
            let now = Instant::now();
            let slot = next.map_or(now, |n| n.max(now));
            *next = Some(slot + self.interval);
            slot
        };
        tokio::time::sleep_until(slot).await;
    }
}

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    gate: RequestGate,
}

impl MusicBrainzClient {
    /// Create a new client
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (mirrors, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
            gate: RequestGate::new(MIN_INTERVAL),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Find an album by artist and title and return its ordered tracklist
    pub async fn album_tracklist(
        &self,
        artist: &str,
        album_name: &str,
    ) -> Result<Vec<TracklistEntry>, ProviderError> {
        let search_url = format!(
            "{}/release?query={}&fmt=json&limit=25",
            self.base_url,
            urlencoding::encode(&release_query(artist, album_name))
        );
        let search: dto::ReleaseSearchResponse = self.get_json(&search_url).await?;

        let release = adapter::pick_release(&search.releases, album_name).ok_or_else(|| {
            ProviderError::NotFound(format!("release '{}' by '{}'", album_name, artist))
        })?;
        debug!(album_name, release_id = %release.id, "Matched MusicBrainz release");

        let lookup_url = format!(
            "{}/release/{}?inc=recordings&fmt=json",
            self.base_url, release.id
        );
        let full: dto::Release = self.get_json(&lookup_url).await?;

        Ok(adapter::to_tracklist(&full))
    }

    /// Send the HTTP request and parse the response
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        self.gate.wait().await;
        debug!(url, "MusicBrainz request");

        let response = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(url.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::SERVICE_UNAVAILABLE
        {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(ProviderError::ApiError(error.error));
            }
            return Err(ProviderError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

/// Lucene query for a release by title and artist.
fn release_query(artist: &str, album_name: &str) -> String {
    format!(
        "release:\"{}\" AND artist:\"{}\"",
        escape_phrase(album_name),
        escape_phrase(artist)
    )
}

fn escape_phrase(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
