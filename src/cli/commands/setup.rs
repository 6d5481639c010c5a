//! Credential and config file commands.

use crate::config::{self, CLIENT_ID_ENV, CLIENT_SECRET_ENV};

/// Report whether Spotify credentials are available
pub fn cmd_check_credentials() -> anyhow::Result<()> {
    let config = config::load();

    if config.credentials.spotify().is_some() {
        println!("✓ Spotify credentials configured");
        return Ok(());
    }

    eprintln!("✗ Spotify credentials not found.");
    eprintln!("Create an app at: https://developer.spotify.com/dashboard");
    eprintln!("Then set {} and {},", CLIENT_ID_ENV, CLIENT_SECRET_ENV);
    if let Some(path) = config::config_path() {
        eprintln!("or add them to [credentials] in {}", path.display());
    }
    anyhow::bail!("missing Spotify credentials")
}

/// Print the config file location, optionally writing defaults
pub fn cmd_config_path(init: bool) -> anyhow::Result<()> {
    let path = config::config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    println!("{}", path.display());

    if !init {
        return Ok(());
    }
    if path.exists() {
        eprintln!("Config file already exists, leaving it unchanged");
        return Ok(());
    }

    config::save_to(&config::Config::default(), &path)?;
    eprintln!("✓ Wrote default config");
    Ok(())
}
