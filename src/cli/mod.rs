//! Command-line interface for album-data.
//!
//! This module provides CLI commands for fetching an artist's per-track
//! dataset and managing credentials and configuration.

mod commands;

pub use commands::{Cli, Commands, run_command};
