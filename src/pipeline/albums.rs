//! Album Resolver - every album an artist has released.

use std::collections::HashSet;

use tracing::info;

use crate::error::Result;
use crate::model::Album;
use crate::providers::AlbumApi;

/// List the artist's albums, one per `(artist, lowercase(album_name))`.
///
/// Requested-album filtering happens later, against the names the provider
/// actually uses. Any provider error aborts the run.
pub async fn resolve_albums(api: &dyn AlbumApi, artist: &str) -> Result<Vec<Album>> {
    let listed = api.list_albums(artist).await?;
    let total = listed.len();

    let mut seen = HashSet::new();
    let albums: Vec<Album> = listed.into_iter().filter(|a| seen.insert(a.key())).collect();

    info!(
        artist,
        albums = albums.len(),
        duplicates = total - albums.len(),
        "Resolved albums"
    );
    Ok(albums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::providers::ProviderError;
    use crate::providers::traits::mocks::MockAlbums;
    use crate::test_utils::album;

    #[tokio::test]
    async fn test_dedupes_case_insensitively() {
        let api = MockAlbums::with_albums(vec![
            album("Wild Child", "Expectations", "a"),
            album("Wild Child", "The Runaround", "b"),
            album("Wild Child", "EXPECTATIONS", "c"),
        ]);

        let albums = resolve_albums(&api, "Wild Child").await.unwrap();

        let ids: Vec<_> = albums.iter().map(|a| a.album_id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_is_fatal() {
        let api = MockAlbums::with_error(ProviderError::Network("reset".to_string()));

        let result = resolve_albums(&api, "Wild Child").await;

        assert!(matches!(result, Err(Error::Provider(ProviderError::Network(_)))));
    }
}
