//! Lyrics Fetcher - per-album lyrics, realigned to `track_n`.
//!
//! Lyrics providers spell titles differently from the track listing, so
//! titles are never used to join. Instead each block's place in the
//! provider response is turned into a `track_n`, the same position rule
//! the Track Enumerator uses.
//!
//! Known accuracy risk: this assumes the lyrics provider orders an album's
//! tracks the same way the track-listing provider does. Bonus tracks or
//! regional editions that reorder the album will misalign lyrics, and
//! nothing here detects it.

use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use super::schedule::Schedule;
use crate::model::{LyricsEntry, Track};
use crate::providers::{LyricBlock, LyricsApi, MissStage, ProviderMiss};

/// Output of the Lyrics Fetcher.
#[derive(Debug, Default)]
pub struct LyricsTable {
    pub entries: Vec<LyricsEntry>,
    pub misses: Vec<ProviderMiss>,
}

/// Turn one album's raw lyric blocks into entries keyed by `track_n`.
///
/// 1. Renumber: a block's `track_n` is the ordinal of its `position` among
///    the distinct positions of the response, in order of first appearance.
///    Gaps and odd starting values in provider numbering disappear.
/// 2. Group blocks by `(track_title, track_n)`, joining their text with
///    newlines. Groups whose blocks carry no text get `None`.
/// 3. Drop the title.
///
/// A response that gives one position two different titles produces two
/// entries with the same `track_n`; the merge rejects that.
pub fn align_lyrics(album_name: &str, blocks: Vec<LyricBlock>) -> Vec<LyricsEntry> {
    let mut ordinals: HashMap<u32, u32> = HashMap::new();
    let mut group_index: HashMap<(String, u32), usize> = HashMap::new();
    let mut groups: Vec<(u32, Vec<String>)> = Vec::new();

    for block in blocks {
        let next = ordinals.len() as u32 + 1;
        let track_n = *ordinals.entry(block.position).or_insert(next);

        let index = *group_index
            .entry((block.track_title, track_n))
            .or_insert_with(|| {
                groups.push((track_n, Vec::new()));
                groups.len() - 1
            });

        if let Some(text) = block.text {
            groups[index].1.push(text);
        }
    }

    groups
        .into_iter()
        .map(|(track_n, texts)| LyricsEntry {
            album_name: album_name.to_string(),
            track_n,
            lyrics: (!texts.is_empty()).then(|| texts.join("\n")),
        })
        .collect()
}

/// Fetch and align one album's lyrics; any failure becomes a miss.
pub async fn fetch_album_lyrics(
    api: &dyn LyricsApi,
    artist: &str,
    album_name: &str,
) -> Result<Vec<LyricsEntry>, ProviderMiss> {
    api.album_lyrics(artist, album_name)
        .await
        .map(|blocks| align_lyrics(album_name, blocks))
        .map_err(|e| ProviderMiss::new(MissStage::Lyrics, album_name, &e))
}

/// Fetch lyrics for every album present in the track table.
///
/// Albums are independent work items. A failed album contributes no
/// entries (its tracks end up with no lyrics) and a [`ProviderMiss`].
pub async fn fetch_lyrics(
    api: &dyn LyricsApi,
    artist: &str,
    tracks: &[Track],
    schedule: Schedule,
) -> LyricsTable {
    let album_names = distinct_albums(tracks);

    let results = schedule
        .run_all(album_names, |album_name| async move {
            fetch_album_lyrics(api, artist, album_name).await
        })
        .await;

    let mut table = LyricsTable::default();
    for result in results {
        match result {
            Ok(entries) => table.entries.extend(entries),
            Err(miss) => {
                warn!(album = %miss.album_name, reason = %miss.reason, "Lyrics unavailable for album");
                table.misses.push(miss);
            }
        }
    }

    info!(
        entries = table.entries.len(),
        failed_albums = table.misses.len(),
        "Fetched lyrics"
    );
    table
}

fn distinct_albums(tracks: &[Track]) -> Vec<&str> {
    let mut seen = HashSet::new();
    tracks
        .iter()
        .map(|t| t.album_name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}
