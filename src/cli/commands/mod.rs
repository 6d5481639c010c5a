//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `fetch`: Run the album data pipeline and write JSON
//! - `setup`: Credential and config file helpers

mod fetch;
mod setup;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{CLIENT_ID_ENV, CLIENT_SECRET_ENV};

pub use fetch::{FetchOptions, cmd_fetch};
pub use setup::{cmd_check_credentials, cmd_config_path};

/// Album Data CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the per-track dataset for an artist's albums
    Fetch {
        /// Artist name
        artist: String,
        /// Album to include (repeatable, case-insensitive)
        #[arg(short, long = "album", value_name = "NAME", required = true)]
        albums: Vec<String>,
        /// Fetch one album at a time
        #[arg(long)]
        sequential: bool,
        /// Concurrency strategy: "default", "sequential", or a worker count
        #[arg(long, value_name = "S")]
        strategy: Option<String>,
        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
        /// Spotify client id (or set SPOTIFY_CLIENT_ID env var)
        #[arg(long, env = CLIENT_ID_ENV, hide_env_values = true)]
        client_id: Option<String>,
        /// Spotify client secret (or set SPOTIFY_CLIENT_SECRET env var)
        #[arg(long, env = CLIENT_SECRET_ENV, hide_env_values = true)]
        client_secret: Option<String>,
    },
    /// Check that Spotify credentials are configured
    CheckCredentials,
    /// Print the config file location
    ConfigPath {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Fetch {
            artist,
            albums,
            sequential,
            strategy,
            output,
            pretty,
            client_id,
            client_secret,
        } => cmd_fetch(&FetchOptions {
            artist,
            albums,
            sequential: *sequential,
            strategy: strategy.as_deref(),
            output: output.as_deref(),
            pretty: *pretty,
            client_id: client_id.as_deref(),
            client_secret: client_secret.as_deref(),
        }),
        Commands::CheckCredentials => cmd_check_credentials(),
        Commands::ConfigPath { init } => cmd_config_path(*init),
    }
}
