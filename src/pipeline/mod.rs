//! The album dataset pipeline.
//!
//! # Architecture
//!
//! Five stages, each producing one table from the previous ones:
//! - **Album Resolver** (`albums.rs`) - every album of the artist
//! - **Track Enumerator** (`tracks.rs`) - tracks of the requested albums,
//!   numbered by position
//! - **Audio Feature Fetcher** (`features.rs`) - batched feature lookup
//! - **Lyrics Fetcher** (`lyrics.rs`) - per-album lyrics aligned to `track_n`
//! - **Merge Engine** (`merge.rs`) - left joins into the final rows
//!
//! Track Enumerator and Lyrics Fetcher fan out per album according to the
//! run's [`Schedule`]; the other stages are single-shot.
//!
//! # Usage
//!
//! ```ignore
//! use album_data::pipeline::get_album_data;
//!
//! let data = get_album_data("Wild Child", ["Expectations"], true, "default")?;
//! println!("{} rows", data.rows.len());
//! ```

pub mod albums;
pub mod features;
pub mod lyrics;
pub mod merge;
pub mod schedule;
pub mod tracks;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::{self, Config};
use crate::error::{Error, Result, ResultExt};
use crate::model::AlbumData;
use crate::providers::{
    AlbumApi, AlbumLyricsClient, AudioFeatureApi, LrclibClient, LyricsApi, MusicBrainzClient,
    SpotifyClient, TrackApi,
};

pub use schedule::{ConcurrencyStrategy, Schedule};

/// A validated pipeline request.
///
/// Construction is the only place input is checked, so an invalid request
/// never reaches a provider.
#[derive(Debug, Clone)]
pub struct AlbumRequest {
    pub artist: String,
    /// Requested album names as given, trimmed, first spelling wins
    pub albums: Vec<String>,
    /// Lowercase album names used for matching
    pub requested: HashSet<String>,
    pub schedule: Schedule,
}

impl AlbumRequest {
    /// Validate the caller's input.
    ///
    /// Fails with [`Error::InvalidInput`] on a blank artist, an empty album
    /// set, or an unknown concurrency strategy.
    pub fn new<I, S>(
        artist: impl Into<String>,
        albums: I,
        parallel: bool,
        concurrency_strategy: &str,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let artist = artist.into().trim().to_string();
        if artist.is_empty() {
            return Err(Error::invalid_input("artist must not be blank"));
        }

        let mut requested = HashSet::new();
        let albums: Vec<String> = albums
            .into_iter()
            .map(|a| a.as_ref().trim().to_string())
            .filter(|a| !a.is_empty())
            .filter(|a| requested.insert(a.to_lowercase()))
            .collect();
        if albums.is_empty() {
            return Err(Error::invalid_input("at least one album must be requested"));
        }

        let strategy: ConcurrencyStrategy = concurrency_strategy.parse()?;

        Ok(Self {
            artist,
            albums,
            requested,
            schedule: strategy.schedule(parallel),
        })
    }
}

/// The pipeline wired to its four collaborators.
pub struct AlbumDataPipeline {
    albums: Arc<dyn AlbumApi>,
    tracks: Arc<dyn TrackApi>,
    features: Arc<dyn AudioFeatureApi>,
    lyrics: Arc<dyn LyricsApi>,
    feature_batch_size: usize,
}

impl AlbumDataPipeline {
    pub fn new(
        albums: Arc<dyn AlbumApi>,
        tracks: Arc<dyn TrackApi>,
        features: Arc<dyn AudioFeatureApi>,
        lyrics: Arc<dyn LyricsApi>,
    ) -> Self {
        Self {
            albums,
            tracks,
            features,
            lyrics,
            feature_batch_size: crate::providers::spotify::FEATURE_BATCH_LIMIT,
        }
    }

    /// Build the production pipeline: Spotify for albums, tracks and
    /// features; MusicBrainz plus LRCLIB for lyrics.
    pub fn from_config(config: &Config) -> Result<Self> {
        let (client_id, client_secret) = config.credentials.spotify().ok_or_else(|| {
            Error::config(format!(
                "Spotify credentials missing: set {} and {} or add them to the config file",
                config::CLIENT_ID_ENV,
                config::CLIENT_SECRET_ENV
            ))
        })?;

        let providers = &config.providers;
        let timeout = Duration::from_secs(providers.request_timeout_secs);

        let spotify = Arc::new(
            SpotifyClient::new(client_id, client_secret)?
                .with_base_urls(&providers.spotify_api_url, &providers.spotify_accounts_url)
                .with_market(providers.spotify_market.clone())
                .with_include_groups(&providers.spotify_include_groups)
                .with_timeout(timeout),
        );
        let lyrics = AlbumLyricsClient::new(
            MusicBrainzClient::with_base_url(&providers.musicbrainz_url)?.with_timeout(timeout),
            LrclibClient::with_base_url(&providers.lrclib_url)?.with_timeout(timeout),
        );

        Ok(Self::new(spotify.clone(), spotify.clone(), spotify, Arc::new(lyrics))
            .with_feature_batch_size(config.pipeline.feature_batch_size))
    }

    pub fn with_feature_batch_size(mut self, batch_size: usize) -> Self {
        self.feature_batch_size = batch_size;
        self
    }

    /// Run every stage and assemble the dataset.
    ///
    /// Per-album failures in track listing or lyrics are collected in
    /// [`AlbumData::misses`]; everything else aborts the run.
    pub async fn run(&self, request: &AlbumRequest) -> Result<AlbumData> {
        info!(
            artist = %request.artist,
            albums = ?request.albums,
            schedule = ?request.schedule,
            "Starting album data run"
        );

        let all_albums = albums::resolve_albums(self.albums.as_ref(), &request.artist).await?;

        let track_table = tracks::enumerate_tracks(
            self.tracks.as_ref(),
            &all_albums,
            &request.requested,
            request.schedule,
        )
        .await;

        let features = features::fetch_features(
            self.features.as_ref(),
            &track_table.tracks,
            self.feature_batch_size,
        )
        .await?;

        let lyrics_table = lyrics::fetch_lyrics(
            self.lyrics.as_ref(),
            &request.artist,
            &track_table.tracks,
            request.schedule,
        )
        .await;

        let mut misses = track_table.misses;
        misses.extend(lyrics_table.misses);

        let rows = merge::merge(track_table.tracks, features, lyrics_table.entries)?;

        let data = AlbumData {
            artist: request.artist.clone(),
            rows,
            misses,
            generated_at: chrono::Utc::now().to_rfc3339(),
        };

        let summary = data.summary();
        info!(
            rows = summary.rows,
            with_features = summary.with_features,
            with_lyrics = summary.with_lyrics,
            misses = summary.misses,
            "Album data run complete"
        );
        Ok(data)
    }

    /// Run on a runtime that lives only for this call.
    ///
    /// Must not be called from inside an async context.
    pub fn run_blocking(&self, request: &AlbumRequest) -> Result<AlbumData> {
        let runtime = request
            .schedule
            .runtime()
            .with_context("Failed to start pipeline runtime")?;
        runtime.block_on(self.run(request))
    }
}

/// Fetch the per-track dataset for an artist's albums.
///
/// Input is validated before configuration is read or any provider is
/// contacted. Credentials and endpoints come from [`config::load`].
pub fn get_album_data<I, S>(
    artist: &str,
    albums: I,
    parallel: bool,
    concurrency_strategy: &str,
) -> Result<AlbumData>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let request = AlbumRequest::new(artist, albums, parallel, concurrency_strategy)?;
    let config = config::load();
    AlbumDataPipeline::from_config(&config)?.run_blocking(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::traits::mocks::{MockAlbums, MockFeatures, MockLyrics, MockTracks};
    use crate::providers::{MissStage, ProviderError};
    use crate::test_utils::{album, features, listing, lyric_blocks, track_uri};

    struct WildChild {
        albums: Arc<MockAlbums>,
        tracks: Arc<MockTracks>,
        features: Arc<MockFeatures>,
        lyrics: Arc<MockLyrics>,
    }

    impl WildChild {
        /// Two albums; "Expectations" has 10 tracks with features for 9.
        fn new() -> Self {
            let mut catalogue: Vec<_> = (1..=9).map(|n| features(&track_uri("exp", n))).collect();
            catalogue.extend((1..=12).map(|n| features(&track_uri("run", n))));

            Self {
                albums: Arc::new(MockAlbums::with_albums(vec![
                    album("Wild Child", "Expectations", "exp"),
                    album("Wild Child", "The Runaround", "run"),
                ])),
                tracks: Arc::new(
                    MockTracks::default()
                        .with_listing("exp", listing("exp", 10))
                        .with_listing("run", listing("run", 12)),
                ),
                features: Arc::new(MockFeatures::with_catalogue(catalogue)),
                lyrics: Arc::new(
                    MockLyrics::default()
                        .with_album("Expectations", lyric_blocks("Expectations", 10))
                        .with_album("The Runaround", lyric_blocks("The Runaround", 12)),
                ),
            }
        }

        fn with_lyrics(mut self, lyrics: MockLyrics) -> Self {
            self.lyrics = Arc::new(lyrics);
            self
        }

        fn with_features(mut self, features: MockFeatures) -> Self {
            self.features = Arc::new(features);
            self
        }

        fn pipeline(&self) -> AlbumDataPipeline {
            AlbumDataPipeline::new(
                self.albums.clone(),
                self.tracks.clone(),
                self.features.clone(),
                self.lyrics.clone(),
            )
        }

        fn total_calls(&self) -> usize {
            self.albums.call_count()
                + self.tracks.call_count()
                + self.features.call_count()
                + self.lyrics.call_count()
        }
    }

    fn request(albums: &[&str], parallel: bool) -> AlbumRequest {
        AlbumRequest::new("Wild Child", albums.iter().copied(), parallel, "default").unwrap()
    }

    #[test]
    fn test_request_rejects_empty_albums() {
        let empty: [&str; 0] = [];
        let result = AlbumRequest::new("Wild Child", empty, true, "default");
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let blank = AlbumRequest::new("Wild Child", ["  "], true, "default");
        assert!(matches!(blank, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_request_rejects_blank_artist_and_bad_strategy() {
        assert!(matches!(
            AlbumRequest::new(" ", ["Expectations"], true, "default"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            AlbumRequest::new("Wild Child", ["Expectations"], true, "fast"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_request_dedupes_case_insensitively() {
        let request = AlbumRequest::new("Wild Child", ["Expectations", "EXPECTATIONS"], false, "default").unwrap();
        assert_eq!(request.albums, ["Expectations"]);
        assert_eq!(request.schedule, Schedule::Sequential);
    }

    #[test]
    fn test_empty_albums_fails_before_any_call() {
        let fixture = WildChild::new();
        let empty: Vec<String> = vec![];

        let result = AlbumRequest::new("Wild Child", empty, true, "default")
            .and_then(|request| fixture.pipeline().run_blocking(&request));

        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(fixture.total_calls(), 0);
    }

    #[test]
    fn test_get_album_data_validates_before_loading_config() {
        let empty: [&str; 0] = [];
        let result = get_album_data("Wild Child", empty, true, "default");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_wild_child_end_to_end() {
        let fixture = WildChild::new();

        let data = fixture.pipeline().run(&request(&["Expectations"], true)).await.unwrap();

        assert_eq!(data.artist, "Wild Child");
        assert_eq!(data.rows.len(), 10);
        let summary = data.summary();
        assert_eq!(summary.with_features, 9);
        assert_eq!(summary.with_lyrics, 10);
        assert_eq!(summary.misses, 0);

        let numbers: Vec<_> = data.rows.iter().map(|r| r.track_n).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
        assert!(data.rows[9].features.is_none());
        assert_eq!(data.rows[3].lyrics.as_deref(), Some("Expectations lyrics 4"));
        // Titles come from the track listing, not the lyrics provider
        assert_eq!(data.rows[0].track_title, "Song 1");
    }

    #[tokio::test]
    async fn test_album_match_is_case_insensitive() {
        let fixture = WildChild::new();
        let pipeline = fixture.pipeline();

        let lower = pipeline.run(&request(&["Expectations"], false)).await.unwrap();
        let upper = pipeline.run(&request(&["EXPECTATIONS"], false)).await.unwrap();

        assert_eq!(lower.rows, upper.rows);
        assert!(upper.rows.iter().all(|r| r.album_name == "Expectations"));
    }

    #[tokio::test]
    async fn test_lyrics_failure_is_isolated_to_one_album() {
        let fixture = WildChild::new().with_lyrics(
            MockLyrics::default()
                .with_album("Expectations", lyric_blocks("Expectations", 10))
                .with_error("The Runaround", ProviderError::NotFound("release".to_string())),
        );

        let data = fixture
            .pipeline()
            .run(&request(&["Expectations", "The Runaround"], true))
            .await
            .unwrap();

        assert_eq!(data.rows.len(), 22);
        assert!(data.album_rows("Expectations").all(|r| r.lyrics.is_some()));
        assert!(data.album_rows("The Runaround").all(|r| r.lyrics.is_none()));
        assert!(data.album_rows("The Runaround").all(|r| r.features.is_some()));
        assert_eq!(data.misses.len(), 1);
        assert_eq!(data.misses[0].stage, MissStage::Lyrics);
    }

    #[tokio::test]
    async fn test_track_listing_failure_is_a_miss() {
        let mut fixture = WildChild::new();
        fixture.tracks = Arc::new(
            MockTracks::default()
                .with_listing("exp", listing("exp", 10))
                .with_error("run", ProviderError::Network("reset".to_string())),
        );

        let data = fixture
            .pipeline()
            .run(&request(&["Expectations", "The Runaround"], true))
            .await
            .unwrap();

        assert_eq!(data.rows.len(), 10);
        assert_eq!(data.misses.len(), 1);
        assert_eq!(data.misses[0].stage, MissStage::Tracks);
        // No lyrics request for an album without tracks
        assert_eq!(fixture.lyrics.call_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_feature_uri_is_integrity_error() {
        let uri = track_uri("exp", 1);
        let fixture = WildChild::new()
            .with_features(MockFeatures::with_catalogue(vec![features(&uri), features(&uri)]));

        let result = fixture.pipeline().run(&request(&["Expectations"], true)).await;

        assert!(matches!(result, Err(Error::Integrity(_))));
    }

    #[tokio::test]
    async fn test_feature_failure_aborts_run() {
        let fixture = WildChild::new().with_features(MockFeatures::with_error(ProviderError::Auth(
            "token rejected".to_string(),
        )));

        let result = fixture.pipeline().run(&request(&["Expectations"], true)).await;

        assert!(matches!(result, Err(Error::Provider(ProviderError::Auth(_)))));
    }

    #[tokio::test]
    async fn test_sequential_and_parallel_agree() {
        let fixture = WildChild::new().with_lyrics(
            MockLyrics::default()
                .with_album("Expectations", lyric_blocks("Expectations", 10))
                .with_album("The Runaround", lyric_blocks("The Runaround", 12))
                .with_delay("Expectations", Duration::from_millis(30)),
        );
        let pipeline = fixture.pipeline();
        let both = ["Expectations", "The Runaround"];

        let sequential = pipeline.run(&request(&both, false)).await.unwrap();
        let parallel = pipeline.run(&request(&both, true)).await.unwrap();

        assert_eq!(sequential.rows, parallel.rows);
    }

    #[test]
    fn test_run_blocking_scopes_its_runtime() {
        let fixture = WildChild::new();
        let pipeline = fixture.pipeline();

        for parallel in [true, false] {
            let data = pipeline.run_blocking(&request(&["The Runaround"], parallel)).unwrap();
            assert_eq!(data.rows.len(), 12);
        }
    }
}
