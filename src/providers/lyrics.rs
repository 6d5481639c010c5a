//! Album lyrics collaborator.
//!
//! MusicBrainz supplies the album's tracklist (order and titles); LRCLIB
//! supplies each track's text. The result is one [`LyricBlock`] per track,
//! positioned by the tracklist.

use tracing::debug;

use super::domain::{LyricBlock, ProviderError};
use super::lrclib::LrclibClient;
use super::musicbrainz::MusicBrainzClient;

pub struct AlbumLyricsClient {
    musicbrainz: MusicBrainzClient,
    lrclib: LrclibClient,
}

impl AlbumLyricsClient {
    pub fn new(musicbrainz: MusicBrainzClient, lrclib: LrclibClient) -> Self {
        Self { musicbrainz, lrclib }
    }

    /// Lyrics for every track on the album, in tracklist order.
    ///
    /// Fails if the album can't be found or any lookup errors; a track
    /// LRCLIB doesn't know yields a block with no text.
    pub async fn album_lyrics(
        &self,
        artist: &str,
        album_name: &str,
    ) -> Result<Vec<LyricBlock>, ProviderError> {
        let tracklist = self.musicbrainz.album_tracklist(artist, album_name).await?;
        if tracklist.is_empty() {
            return Err(ProviderError::NotFound(format!(
                "tracklist for '{}'",
                album_name
            )));
        }

        let mut blocks = Vec::with_capacity(tracklist.len());
        for entry in tracklist {
            let text = self
                .lrclib
                .track_lyrics(artist, &entry.title, album_name)
                .await?;
            blocks.push(LyricBlock {
                track_title: entry.title,
                position: entry.position,
                text,
            });
        }

        debug!(
            album_name,
            tracks = blocks.len(),
            with_text = blocks.iter().filter(|b| b.text.is_some()).count(),
            "Fetched album lyrics"
        );
        Ok(blocks)
    }
}
