use crate::services::download_processor::{CoverTagger, CoverTaggerError};
use crate::types::TrackMetadata;
use async_trait::async_trait;
use audiotags::{Id3v2Tag, MimeType, Picture, Tag};
use reqwest::header;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use ytdlp_client::BROWSER_USER_AGENT;

const COVER_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

#[derive(Debug, PartialEq)]
enum CoverFormat {
    Png,
    Jpeg,
}

/// Sniffs the image format from magic bytes. Anything unrecognized is
/// treated as JPEG.
fn sniff_format(bytes: &[u8]) -> CoverFormat {
    if bytes.starts_with(PNG_MAGIC) {
        CoverFormat::Png
    } else if bytes.starts_with(JPEG_MAGIC) {
        CoverFormat::Jpeg
    } else {
        CoverFormat::Jpeg
    }
}

/// Embeds the track's artwork and text tags into the produced MP3 file.
pub(crate) struct CoverArtService {
    http_client: reqwest::Client,
}

impl CoverArtService {
    pub(crate) fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    async fn fetch_artwork(&self, url: &str) -> Result<Vec<u8>, reqwest::Error> {
        let response = self
            .http_client
            .get(url)
            .timeout(COVER_FETCH_TIMEOUT)
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl CoverTagger for CoverArtService {
    async fn embed(
        &self,
        file_path: &Path,
        metadata: &TrackMetadata,
    ) -> Result<(), CoverTaggerError> {
        // Fetch the artwork before opening the tag: `Box<dyn AudioTag>` is
        // not `Send` and cannot be held across the await point.
        let artwork = match &metadata.thumbnail {
            Some(thumbnail_url) => {
                let bytes = self
                    .fetch_artwork(thumbnail_url)
                    .await
                    .map_err(|error| CoverTaggerError(Box::new(error)))?;

                let mime_type = match sniff_format(&bytes) {
                    CoverFormat::Png => MimeType::Png,
                    CoverFormat::Jpeg => MimeType::Jpeg,
                };

                debug!(
                    url = thumbnail_url,
                    size = bytes.len(),
                    ?mime_type,
                    "Embedding cover art"
                );

                Some((bytes, mime_type))
            }
            None => None,
        };

        let mut tag = match Tag::new().read_from_path(file_path) {
            Ok(tag) => tag,
            // Freshly transcoded files may carry no tag at all
            Err(_) => Box::new(Id3v2Tag::new()),
        };

        tag.set_title(&metadata.title);
        if let Some(artist) = metadata.artist.as_deref().or(metadata.uploader.as_deref()) {
            tag.set_artist(artist);
        }

        if let Some((bytes, mime_type)) = &artwork {
            tag.set_album_cover(Picture::new(bytes, *mime_type));
        }

        let path = file_path
            .to_str()
            .ok_or_else(|| CoverTaggerError("non-utf8 output path".into()))?;

        tag.write_to_path(path)
            .map_err(|error| CoverTaggerError(Box::new(error)))?;

        Ok(())
    }
}
