//! Track Enumerator - ordered track listings with position-based numbering.

use std::collections::HashSet;

use tracing::{info, warn};

use super::schedule::Schedule;
use crate::model::{Album, Track};
use crate::providers::{MissStage, ProviderMiss, TrackApi, TrackListing};

/// Output of the Track Enumerator.
#[derive(Debug, Default)]
pub struct TrackTable {
    pub tracks: Vec<Track>,
    pub misses: Vec<ProviderMiss>,
}

/// Number an album's listing by position: the n-th entry gets `track_n = n`.
///
/// Provider track numbers are ignored; they repeat across discs and are not
/// guaranteed contiguous.
pub fn number_tracks(album_name: &str, listing: Vec<TrackListing>) -> Vec<Track> {
    listing
        .into_iter()
        .zip(1u32..)
        .map(|(entry, track_n)| Track {
            album_name: album_name.to_string(),
            track_title: entry.track_title,
            track_uri: entry.track_uri,
            track_n,
        })
        .collect()
}

/// List and number the tracks of every requested album.
///
/// `requested` holds lowercase album names. Albums are matched against the
/// provider's own spelling of the name. An album whose listing fails
/// contributes no rows and a [`ProviderMiss`]; the others are unaffected.
pub async fn enumerate_tracks(
    api: &dyn TrackApi,
    albums: &[Album],
    requested: &HashSet<String>,
    schedule: Schedule,
) -> TrackTable {
    let wanted: Vec<&Album> = albums
        .iter()
        .filter(|a| requested.contains(&a.album_name.to_lowercase()))
        .collect();

    let listed: HashSet<String> = wanted.iter().map(|a| a.album_name.to_lowercase()).collect();
    for name in requested.iter().filter(|n| !listed.contains(*n)) {
        warn!(album = %name, "Requested album not listed by provider");
    }

    let results = schedule
        .run_all(wanted, |album| async move {
            match api.list_tracks(album).await {
                Ok(listing) => Ok(number_tracks(&album.album_name, listing)),
                Err(e) => Err(ProviderMiss::new(MissStage::Tracks, &album.album_name, &e)),
            }
        })
        .await;

    let mut table = TrackTable::default();
    for result in results {
        match result {
            Ok(tracks) => table.tracks.extend(tracks),
            Err(miss) => {
                warn!(album = %miss.album_name, reason = %miss.reason, "Track listing failed, skipping album");
                table.misses.push(miss);
            }
        }
    }

    info!(
        tracks = table.tracks.len(),
        failed_albums = table.misses.len(),
        "Enumerated tracks"
    );
    table
}
