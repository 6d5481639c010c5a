//! Adapter layer: Convert MusicBrainz DTOs to domain models

use super::dto;

/// One entry of a release's tracklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracklistEntry {
    /// Album-wide position: continues counting across discs
    pub position: u32,
    pub title: String,
}

/// Choose the release that best represents the requested album.
///
/// Only releases whose title matches case-insensitively are considered.
/// Among those, official albums win, then any official release, then the
/// first match.
pub fn pick_release<'a>(releases: &'a [dto::Release], album_name: &str) -> Option<&'a dto::Release> {
    let wanted = album_name.trim().to_lowercase();
    let matching: Vec<&dto::Release> = releases
        .iter()
        .filter(|r| r.title.to_lowercase() == wanted)
        .collect();

    matching
        .iter()
        .find(|r| {
            r.status.as_deref() == Some("Official")
                && r.release_group
                    .as_ref()
                    .and_then(|rg| rg.primary_type.as_deref())
                    == Some("Album")
        })
        .or_else(|| {
            matching
                .iter()
                .find(|r| r.status.as_deref() == Some("Official"))
        })
        .or_else(|| matching.first())
        .copied()
}

/// Flatten a release's media into one ordered tracklist.
///
/// Per-disc positions restart at 1, so positions are recomputed as a
/// running count in media order, then track order.
pub fn to_tracklist(release: &dto::Release) -> Vec<TracklistEntry> {
    let mut media: Vec<&dto::Medium> = release.media.iter().collect();
    media.sort_by_key(|m| m.position.unwrap_or(u32::MAX));

    media
        .into_iter()
        .flat_map(|m| {
            let mut tracks: Vec<&dto::Track> = m.tracks.iter().collect();
            tracks.sort_by_key(|t| t.position.unwrap_or(u32::MAX));
            tracks
        })
        .zip(1u32..)
        .map(|(track, position)| TracklistEntry {
            position,
            title: track.title.clone(),
        })
        .collect()
}
