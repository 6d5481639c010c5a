//! Trait definitions for the external collaborators.
//!
//! The pipeline only ever talks to these traits, so tests can swap the
//! real HTTP clients for the mocks in [`mocks`].
//!
//! # Example
//!
//! ```ignore
//! use album_data::providers::traits::AlbumApi;
//!
//! async fn count_albums<T: AlbumApi>(client: &T, artist: &str) -> usize {
//!     client.list_albums(artist).await.map(|a| a.len()).unwrap_or(0)
//! }
//! ```

use async_trait::async_trait;

use super::domain::{LyricBlock, ProviderError, TrackListing};
use crate::model::{Album, AudioFeatures};

/// Lists every album released by an artist.
#[async_trait]
pub trait AlbumApi: Send + Sync {
    async fn list_albums(&self, artist: &str) -> Result<Vec<Album>, ProviderError>;
}

/// Lists the tracks of one album, in album order.
#[async_trait]
pub trait TrackApi: Send + Sync {
    async fn list_tracks(&self, album: &Album) -> Result<Vec<TrackListing>, ProviderError>;
}

/// Looks up measured audio features for a batch of track ids.
///
/// Ids the provider doesn't know are simply missing from the result.
#[async_trait]
pub trait AudioFeatureApi: Send + Sync {
    /// Largest batch the provider accepts in one call
    fn max_batch_size(&self) -> usize {
        100
    }

    async fn get_features(&self, track_uris: &[String]) -> Result<Vec<AudioFeatures>, ProviderError>;
}

/// Retrieves the full lyrics of an album as ordered blocks.
#[async_trait]
pub trait LyricsApi: Send + Sync {
    async fn album_lyrics(
        &self,
        artist: &str,
        album_name: &str,
    ) -> Result<Vec<LyricBlock>, ProviderError>;
}

// Implement traits for real clients

#[async_trait]
impl AlbumApi for super::spotify::SpotifyClient {
    async fn list_albums(&self, artist: &str) -> Result<Vec<Album>, ProviderError> {
        self.list_albums(artist).await
    }
}

#[async_trait]
impl TrackApi for super::spotify::SpotifyClient {
    async fn list_tracks(&self, album: &Album) -> Result<Vec<TrackListing>, ProviderError> {
        self.list_tracks(album).await
    }
}

#[async_trait]
impl AudioFeatureApi for super::spotify::SpotifyClient {
    fn max_batch_size(&self) -> usize {
        super::spotify::FEATURE_BATCH_LIMIT
    }

    async fn get_features(&self, track_uris: &[String]) -> Result<Vec<AudioFeatures>, ProviderError> {
        self.get_features(track_uris).await
    }
}

#[async_trait]
impl LyricsApi for super::lyrics::AlbumLyricsClient {
    async fn album_lyrics(
        &self,
        artist: &str,
        album_name: &str,
    ) -> Result<Vec<LyricBlock>, ProviderError> {
        self.album_lyrics(artist, album_name).await
    }
}
