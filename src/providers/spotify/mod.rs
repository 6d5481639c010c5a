//! Spotify Web API integration
//!
//! Provides the album listing, track listing and audio-feature
//! collaborators.
//!
//! API docs: https://developer.spotify.com/documentation/web-api

pub mod dto;
mod adapter;
mod client;

pub use client::{DEFAULT_ACCOUNTS_URL, DEFAULT_API_URL, FEATURE_BATCH_LIMIT, SpotifyClient};
