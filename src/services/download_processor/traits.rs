use crate::types::{TrackMetadata, TrackUrl};
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ResolveError {
    #[error("The link is not a valid track URL")]
    InvalidUrl,
    #[error("The link points to a site the extractor does not support")]
    UnsupportedSite,
    #[error("Metadata extraction timed out")]
    Timeout,
    #[error("Metadata extraction failed: {0}")]
    Extraction(String),
}

/// Resolves a validated track URL to its metadata without downloading media.
#[async_trait]
pub(crate) trait TrackResolver: Send + Sync {
    async fn resolve(&self, url: &TrackUrl) -> Result<TrackMetadata, ResolveError>;
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum FetchError {
    #[error("Audio download timed out")]
    Timeout,
    #[error("Audio download or conversion failed: {0}")]
    Transcode(String),
}

/// Downloads the best audio stream for a track and transcodes it to MP3 at
/// the requested bitrate. On success the file is expected at
/// `<output_base>.mp3`.
#[async_trait]
pub(crate) trait AudioFetcher: Send + Sync {
    async fn fetch(
        &self,
        webpage_url: &str,
        output_base: &Path,
        bitrate: u32,
    ) -> Result<(), FetchError>;
}

#[derive(Debug, thiserror::Error)]
#[error("Unable to embed tags: {0}")]
pub(crate) struct CoverTaggerError(pub(crate) Box<dyn std::error::Error + Send + Sync>);

/// Embeds cover art and text tags into a produced audio file, in place.
/// Callers treat failures as non-fatal.
#[async_trait]
pub(crate) trait CoverTagger: Send + Sync {
    async fn embed(
        &self,
        file_path: &Path,
        metadata: &TrackMetadata,
    ) -> Result<(), CoverTaggerError>;
}
