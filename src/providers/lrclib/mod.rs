//! LRCLIB integration - per-track lyrics text.

pub mod dto;
mod client;

pub use client::{DEFAULT_BASE_URL, LrclibClient};
