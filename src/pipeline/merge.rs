//! Merge Engine - left-joins features and lyrics onto the track table.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{AlbumDataRow, AudioFeatures, LyricsEntry, Track};

/// Join the three tables into final rows.
///
/// Tracks drive the output: one row per track, in track order. Features
/// join on `track_uri`, lyrics on `(album_name, track_n)`. A key that
/// appears twice on the joined side would duplicate rows, so it is
/// rejected with [`Error::Integrity`] instead.
pub fn merge(
    tracks: Vec<Track>,
    features: Vec<AudioFeatures>,
    lyrics: Vec<LyricsEntry>,
) -> Result<Vec<AlbumDataRow>> {
    let features = index_features(features)?;
    let lyrics = index_lyrics(lyrics)?;

    let rows: Vec<AlbumDataRow> = tracks
        .into_iter()
        .map(|track| {
            let features = features.get(&track.track_uri).cloned();
            let lyrics = lyrics
                .get(&(track.album_name.clone(), track.track_n))
                .cloned()
                .flatten();
            AlbumDataRow {
                album_name: track.album_name,
                track_title: track.track_title,
                track_uri: track.track_uri,
                track_n: track.track_n,
                features,
                lyrics,
            }
        })
        .collect();

    debug!(
        rows = rows.len(),
        features = features.len(),
        lyrics = lyrics.len(),
        "Merged tables"
    );
    Ok(rows)
}

fn index_features(features: Vec<AudioFeatures>) -> Result<HashMap<String, AudioFeatures>> {
    let mut index = HashMap::with_capacity(features.len());
    for f in features {
        if index.contains_key(&f.track_uri) {
            return Err(Error::integrity(format!(
                "audio features returned twice for track {}",
                f.track_uri
            )));
        }
        index.insert(f.track_uri.clone(), f);
    }
    Ok(index)
}

fn index_lyrics(lyrics: Vec<LyricsEntry>) -> Result<HashMap<(String, u32), Option<String>>> {
    let mut index = HashMap::with_capacity(lyrics.len());
    for entry in lyrics {
        let key = (entry.album_name, entry.track_n);
        if index.contains_key(&key) {
            return Err(Error::integrity(format!(
                "lyrics returned twice for track {} of {}",
                key.1, key.0
            )));
        }
        index.insert(key, entry.lyrics);
    }
    Ok(index)
}
