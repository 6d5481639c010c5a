//! Album data fetch command.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;

use crate::config;
use crate::model::AlbumData;
use crate::pipeline::{AlbumDataPipeline, AlbumRequest};

/// Arguments for [`cmd_fetch`], borrowed from the parsed CLI.
pub struct FetchOptions<'a> {
    pub artist: &'a str,
    pub albums: &'a [String],
    pub sequential: bool,
    pub strategy: Option<&'a str>,
    pub output: Option<&'a Path>,
    pub pretty: bool,
    pub client_id: Option<&'a str>,
    pub client_secret: Option<&'a str>,
}

/// Run the pipeline and write the dataset as JSON.
///
/// CLI flags override the config file.
pub fn cmd_fetch(opts: &FetchOptions) -> anyhow::Result<()> {
    let mut config = config::load();
    if let Some(id) = opts.client_id {
        config.credentials.spotify_client_id = Some(id.to_string());
    }
    if let Some(secret) = opts.client_secret {
        config.credentials.spotify_client_secret = Some(secret.to_string());
    }

    let parallel = config.pipeline.parallel && !opts.sequential;
    let strategy = opts
        .strategy
        .unwrap_or(config.pipeline.concurrency_strategy.as_str());

    let request = AlbumRequest::new(opts.artist, opts.albums, parallel, strategy)?;
    let pipeline = AlbumDataPipeline::from_config(&config)?;

    eprintln!("Fetching {} album(s) for {}...", request.albums.len(), request.artist);
    let data = pipeline.run_blocking(&request)?;

    match opts.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_json(BufWriter::new(file), &data, opts.pretty)?;
            eprintln!("Wrote {}", path.display());
        }
        None => write_json(io::stdout().lock(), &data, opts.pretty)?,
    }

    print_summary(&data);
    Ok(())
}

fn write_json<W: Write>(mut writer: W, data: &AlbumData, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, data)?;
    } else {
        serde_json::to_writer(&mut writer, data)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn print_summary(data: &AlbumData) {
    let summary = data.summary();
    eprintln!();
    eprintln!("Rows:            {}", summary.rows);
    eprintln!("With features:   {}", summary.with_features);
    eprintln!("With lyrics:     {}", summary.with_lyrics);
    eprintln!("Provider misses: {}", summary.misses);
    for miss in &data.misses {
        eprintln!("  ⚠ {} ({}): {}", miss.album_name, miss.stage, miss.reason);
    }
}
