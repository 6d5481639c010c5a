//! Album Data - a per-track dataset for a music artist.
//!
//! Combines three independently sourced facts per song: album and track
//! metadata, measured audio features, and lyrics. Providers are reached
//! through the traits in [`providers::traits`], and [`pipeline`] joins
//! their answers into one row per track.

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod providers;
#[cfg(test)]
pub mod test_utils;

pub use error::{Error, Result};
pub use model::{AlbumData, AlbumDataRow};
pub use pipeline::{AlbumDataPipeline, AlbumRequest, get_album_data};
