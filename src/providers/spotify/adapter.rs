//! Adapter layer: Convert Spotify DTOs to domain models
//!
//! This is the ONLY place where Spotify DTO types become domain types.

use super::dto;
use crate::model::{Album, AudioFeatures};
use crate::providers::domain::TrackListing;

/// Pick the artist whose name matches case-insensitively, else the top hit.
pub fn pick_artist<'a>(artists: &'a [dto::Artist], wanted: &str) -> Option<&'a dto::Artist> {
    let wanted = wanted.trim().to_lowercase();
    artists
        .iter()
        .find(|a| a.name.to_lowercase() == wanted)
        .or_else(|| artists.first())
}

pub fn to_album(artist: &str, album: dto::SimplifiedAlbum) -> Album {
    Album {
        artist: artist.to_string(),
        album_name: album.name,
        album_id: album.id,
    }
}

pub fn to_listing(track: dto::SimplifiedTrack) -> TrackListing {
    TrackListing {
        track_title: track.name,
        track_uri: track.uri,
    }
}

pub fn to_features(f: dto::AudioFeatures) -> AudioFeatures {
    AudioFeatures {
        track_uri: f.uri,
        danceability: f.danceability,
        energy: f.energy,
        key: f.key,
        loudness: f.loudness,
        mode: f.mode,
        speechiness: f.speechiness,
        acousticness: f.acousticness,
        instrumentalness: f.instrumentalness,
        liveness: f.liveness,
        valence: f.valence,
        tempo: f.tempo,
        duration_ms: f.duration_ms,
        time_signature: f.time_signature,
    }
}

/// Flatten a feature response, dropping `null` entries for unknown ids.
pub fn to_feature_rows(response: dto::AudioFeaturesResponse) -> Vec<AudioFeatures> {
    response
        .audio_features
        .into_iter()
        .flatten()
        .map(to_features)
        .collect()
}

/// `spotify:track:abc` -> `abc`; bare ids pass through.
pub fn track_id(uri: &str) -> &str {
    uri.rsplit(':').next().unwrap_or(uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(id: &str, name: &str) -> dto::Artist {
        dto::Artist {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_pick_artist_prefers_exact_match() {
        let artists = vec![artist("1", "Wild Children"), artist("2", "Wild Child")];
        assert_eq!(pick_artist(&artists, "wild child").map(|a| a.id.as_str()), Some("2"));
    }

    #[test]
    fn test_pick_artist_falls_back_to_top_hit() {
        let artists = vec![artist("1", "Wild Children")];
        assert_eq!(pick_artist(&artists, "Wild Child").map(|a| a.id.as_str()), Some("1"));
        assert!(pick_artist(&[], "Wild Child").is_none());
    }

    #[test]
    fn test_track_id_from_uri() {
        assert_eq!(track_id("spotify:track:abc123"), "abc123");
        assert_eq!(track_id("abc123"), "abc123");
    }

    #[test]
    fn test_null_features_are_dropped() {
        let response = dto::AudioFeaturesResponse {
            audio_features: vec![None, None],
        };
        assert!(to_feature_rows(response).is_empty());
    }
}
