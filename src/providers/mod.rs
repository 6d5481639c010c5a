//! External collaborators - album, track, audio-feature and lyrics providers.
//!
//! # Architecture
//!
//! Each provider keeps a clean separation between:
//! - **DTOs** (`spotify/dto.rs`, `musicbrainz/dto.rs`, `lrclib/dto.rs`) - exact API response shapes
//! - **Adapters** - convert DTOs to our domain and model types
//! - **Clients** - HTTP clients for the external APIs
//!
//! The pipeline only sees the traits in [`traits`], so API changes stay
//! inside their provider module and tests can run against mocks.
//!
//! | Collaborator    | Trait                    | Implementation        |
//! |-----------------|--------------------------|-----------------------|
//! | album listing   | [`traits::AlbumApi`]        | [`SpotifyClient`]     |
//! | track listing   | [`traits::TrackApi`]        | [`SpotifyClient`]     |
//! | audio features  | [`traits::AudioFeatureApi`] | [`SpotifyClient`]     |
//! | album lyrics    | [`traits::LyricsApi`]       | [`AlbumLyricsClient`] |

pub mod domain;
pub mod lrclib;
pub mod lyrics;
pub mod musicbrainz;
pub mod spotify;
pub mod traits;

pub use domain::{LyricBlock, MissStage, ProviderError, ProviderMiss, TrackListing};
pub use lrclib::LrclibClient;
pub use lyrics::AlbumLyricsClient;
pub use musicbrainz::MusicBrainzClient;
pub use spotify::SpotifyClient;
pub use traits::{AlbumApi, AudioFeatureApi, LyricsApi, TrackApi};
