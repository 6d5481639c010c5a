//! Spotify Web API client
//!
//! Serves three collaborators at once: album listing, track listing and
//! audio features. Authenticates with the client-credentials flow and keeps
//! the bearer token until shortly before it expires.
//!
//! See: https://developer.spotify.com/documentation/web-api

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{adapter, dto};
use crate::model::{Album, AudioFeatures};
use crate::providers::domain::{ProviderError, TrackListing};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Page size for album and track listings (API maximum)
const PAGE_LIMIT: u32 = 50;

/// Refresh the token this long before Spotify says it expires
const TOKEN_SLACK: Duration = Duration::from_secs(60);

/// Largest id batch accepted by `/audio-features`
pub const FEATURE_BATCH_LIMIT: usize = 100;

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Spotify Web API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    client_id: String,
    client_secret: String,
    api_url: String,
    accounts_url: String,
    market: Option<String>,
    include_groups: String,
    timeout: Duration,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    /// Create a client for the given application credentials
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ProviderError> {
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
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_url: DEFAULT_API_URL.to_string(),
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            market: None,
            include_groups: "album".to_string(),
            timeout: Duration::from_secs(30),
            token: Mutex::new(None),
        })
    }

    /// Point the client at different API and accounts hosts
    pub fn with_base_urls(mut self, api_url: impl Into<String>, accounts_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self.accounts_url = accounts_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Restrict listings to one market (ISO 3166-1 alpha-2)
    pub fn with_market(mut self, market: Option<String>) -> Self {
        self.market = market;
        self
    }

    /// Album groups to list, e.g. `album` or `album,single`
    pub fn with_include_groups(mut self, groups: impl Into<String>) -> Self {
        self.include_groups = groups.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// List every album of the best-matching artist
    pub async fn list_albums(&self, artist: &str) -> Result<Vec<Album>, ProviderError> {
        let search_url = format!(
            "{}/search?q={}&type=artist&limit=10",
            self.api_url,
            urlencoding::encode(artist)
        );
        let search: dto::ArtistSearchResponse = self.get_json(&search_url).await?;

        let found = adapter::pick_artist(&search.artists.items, artist)
            .ok_or_else(|| ProviderError::NotFound(format!("artist '{}'", artist)))?;
        debug!(artist, spotify_artist = %found.name, id = %found.id, "Resolved artist");

        let albums_url = format!(
            "{}/artists/{}/albums?include_groups={}&limit={}{}",
            self.api_url,
            found.id,
            urlencoding::encode(&self.include_groups),
            PAGE_LIMIT,
            self.market_param()
        );
        let albums: Vec<dto::SimplifiedAlbum> = self.get_paged(&albums_url).await?;

        Ok(albums
            .into_iter()
            .map(|a| adapter::to_album(artist, a))
            .collect())
    }

    /// List an album's tracks in album order
    pub async fn list_tracks(&self, album: &Album) -> Result<Vec<TrackListing>, ProviderError> {
        let url = format!(
            "{}/albums/{}/tracks?limit={}{}",
            self.api_url,
            album.album_id,
            PAGE_LIMIT,
            self.market_param()
        );
        let tracks: Vec<dto::SimplifiedTrack> = self.get_paged(&url).await?;
        Ok(tracks.into_iter().map(adapter::to_listing).collect())
    }

    /// Fetch audio features for at most [`FEATURE_BATCH_LIMIT`] tracks
    pub async fn get_features(&self, track_uris: &[String]) -> Result<Vec<AudioFeatures>, ProviderError> {
        if track_uris.is_empty() {
            return Ok(Vec::new());
        }
        if track_uris.len() > FEATURE_BATCH_LIMIT {
            return Err(ProviderError::ApiError(format!(
                "batch of {} exceeds the {} id limit",
                track_uris.len(),
                FEATURE_BATCH_LIMIT
            )));
        }

        let ids = track_uris
            .iter()
            .map(|uri| adapter::track_id(uri))
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/audio-features?ids={}", self.api_url, ids);
        let response: dto::AudioFeaturesResponse = self.get_json(&url).await?;
        Ok(adapter::to_feature_rows(response))
    }

    fn market_param(&self) -> String {
        match &self.market {
            Some(market) => format!("&market={}", urlencoding::encode(market)),
            None => String::new(),
        }
    }

    /// Return the cached token, or fetch a fresh one
    async fn access_token(&self) -> Result<String, ProviderError> {
        let cached = self
            .token
            .lock()
            .as_ref()
            .filter(|t| t.expires_at > Instant::now())
            .map(|t| t.value.clone());
        if let Some(value) = cached {
            return Ok(value);
        }

        let url = format!("{}/api/token", self.accounts_url);
        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Auth(format!(
                "token request returned HTTP {}",
                status
            )));
        }

        let token: dto::TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_SLACK);
        *self.token.lock() = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        debug!(expires_in = token.expires_in, "Fetched Spotify access token");

        Ok(token.access_token)
    }

    /// Send an authorized GET and parse the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        let token = self.access_token().await?;
        debug!(url, "Spotify request");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(url.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            *self.token.lock() = None;
            return Err(ProviderError::Auth("access token rejected".to_string()));
        }

        if !status.is_success() {
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(ProviderError::ApiError(error.error.message));
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

    /// Follow `next` links until the listing is exhausted
    async fn get_paged<T: DeserializeOwned>(&self, first_url: &str) -> Result<Vec<T>, ProviderError> {
        let mut items = Vec::new();
        let mut next = Some(first_url.to_string());

        while let Some(url) = next {
            let page: dto::Paging<T> = self.get_json(&url).await?;
            items.extend(page.items);
            next = page.next;
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults() {
        let client = SpotifyClient::new("id", "secret").unwrap();
        assert_eq!(client.api_url, DEFAULT_API_URL);
        assert_eq!(client.accounts_url, DEFAULT_ACCOUNTS_URL);
        assert_eq!(client.include_groups, "album");
        assert!(client.market.is_none());
    }

    #[test]
    fn test_base_urls_are_trimmed() {
        let client = SpotifyClient::new("id", "secret")
            .unwrap()
            .with_base_urls("http://localhost:8080/v1/", "http://localhost:8081/");
        assert_eq!(client.api_url, "http://localhost:8080/v1");
        assert_eq!(client.accounts_url, "http://localhost:8081");
    }

    #[test]
    fn test_market_param() {
        let client = SpotifyClient::new("id", "secret").unwrap();
        assert_eq!(client.market_param(), "");

        let client = client.with_market(Some("GB".to_string()));
        assert_eq!(client.market_param(), "&market=GB");
    }

    #[tokio::test]
    async fn test_empty_feature_batch_skips_request() {
        // Unroutable host: any request would fail
        let client = SpotifyClient::new("id", "secret")
            .unwrap()
            .with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9");
        let features = client.get_features(&[]).await.unwrap();
        assert!(features.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_feature_batch_is_rejected() {
        let client = SpotifyClient::new("id", "secret").unwrap();
        let uris: Vec<String> = (0..=FEATURE_BATCH_LIMIT).map(|i| format!("spotify:track:{i}")).collect();
        let result = client.get_features(&uris).await;
        assert!(matches!(result, Err(ProviderError::ApiError(_))));
    }
}
