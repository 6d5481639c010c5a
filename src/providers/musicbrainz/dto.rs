//! MusicBrainz API Data Transfer Objects
//!
//! These types match what the MusicBrainz API returns.
//! DO NOT use these types outside the musicbrainz module - convert to domain types.
//!
//! API Reference: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! We use the /release search endpoint to find an album by title and artist,
//! then look the release up with `inc=recordings` to get its tracklist.

use serde::{Deserialize, Serialize};

/// Release search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseSearchResponse {
    #[serde(default)]
    pub releases: Vec<Release>,
}

/// Release (album/single/EP)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Release {
    /// MusicBrainz release ID
    pub id: String,
    /// Release title
    pub title: String,
    /// Search relevance (0-100), only present on search results
    pub score: Option<u32>,
    /// Release status (Official, Bootleg, etc.)
    pub status: Option<String>,
    /// Release date (YYYY, YYYY-MM, or YYYY-MM-DD)
    pub date: Option<String>,
    /// Release group (groups same album across editions)
    pub release_group: Option<ReleaseGroup>,
    /// Media (discs) in this release
    #[serde(default)]
    pub media: Vec<Medium>,
}

/// Release group (e.g., "Abbey Road" across all editions)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseGroup {
    pub id: String,
    /// Primary type (Album, Single, EP, etc.)
    pub primary_type: Option<String>,
}

/// Medium (disc) within a release
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Medium {
    /// Position in release (disc number)
    pub position: Option<u32>,
    /// Format (CD, Vinyl, Digital, etc.)
    pub format: Option<String>,
    /// Number of tracks
    pub track_count: Option<u32>,
    /// Tracks on this medium
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Track on a medium
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    /// Track position on medium (restarts at 1 per disc)
    pub position: Option<u32>,
    /// Track number as printed (may include disc prefix like "1-5")
    pub number: Option<String>,
    /// Track title (may differ from recording title)
    pub title: String,
}

/// Error response from MusicBrainz API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    pub help: Option<String>,
}

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_release_search() {
        let json = r#"{
            "created": "2024-01-01T00:00:00.000Z",
            "count": 1,
            "offset": 0,
            "releases": [{
                "id": "rel-1",
                "score": 100,
                "title": "Expectations",
                "status": "Official",
                "date": "2018-01-26",
                "release-group": {"id": "rg-1", "primary-type": "Album"}
            }]
        }"#;

        let search: ReleaseSearchResponse =
            serde_json::from_str(json).expect("Should parse release search");
        assert_eq!(search.releases.len(), 1);
        let release = &search.releases[0];
        assert_eq!(release.score, Some(100));
        assert_eq!(
            release.release_group.as_ref().and_then(|rg| rg.primary_type.as_deref()),
            Some("Album")
        );
        assert!(release.media.is_empty());
    }

    #[test]
    fn test_parse_release_with_recordings() {
        let json = r#"{
            "id": "rel-1",
            "title": "Expectations",
            "media": [{
                "position": 1,
                "format": "Digital Media",
                "track-count": 2,
                "tracks": [
                    {"position": 1, "number": "1", "title": "Back & Forth", "length": 201000},
                    {"position": 2, "number": "2", "title": "Expectations", "length": 188000}
                ]
            }]
        }"#;

        let release: Release = serde_json::from_str(json).expect("Should parse release");
        assert_eq!(release.media[0].track_count, Some(2));
        assert_eq!(release.media[0].tracks[1].title, "Expectations");
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{
            "error": "Not Found",
            "help": "For usage, please see: https://musicbrainz.org/doc/MusicBrainz_API"
        }"#;

        let error: ApiError = serde_json::from_str(json).expect("Should parse error");
        assert_eq!(error.error, "Not Found");
        assert!(error.help.is_some());
    }
}
