use crate::services::download_processor::traits::{
    AudioFetcher, CoverTagger, FetchError, ResolveError, TrackResolver,
};
use crate::services::download_processor::types::{DownloadRequest, DownloadResponse};
use crate::services::filename::{self, NOT_AVAILABLE};
use crate::types::{TrackMetadata, TrackUrl, TrackUrlError};
use crate::utils::format_duration;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const TARGET_EXTENSION: &str = "mp3";

#[derive(Debug, thiserror::Error)]
pub(crate) enum DownloadProcessError {
    #[error(transparent)]
    BadTrackUrl(#[from] TrackUrlError),
    #[error(transparent)]
    ResolveError(#[from] ResolveError),
    #[error(transparent)]
    FetchError(#[from] FetchError),
    #[error("Could not find the converted audio file after processing")]
    OutputFileMissing,
    #[error("Unable to access the produced file: {0}")]
    Storage(#[from] std::io::Error),
}

impl DownloadProcessError {
    /// True for failures caused by the request itself, reported as 4xx.
    pub(crate) fn is_client_error(&self) -> bool {
        matches!(self, Self::BadTrackUrl(_))
    }
}

/// Orchestrates a single download request: validate, resolve, download and
/// transcode, tag, then package the file as an inline data URI.
pub(crate) struct DownloadProcessor {
    resolver: Arc<dyn TrackResolver>,
    fetcher: Arc<dyn AudioFetcher>,
    tagger: Arc<dyn CoverTagger>,
    downloads_dir: PathBuf,
}

impl DownloadProcessor {
    pub(crate) fn new(
        resolver: Arc<dyn TrackResolver>,
        fetcher: Arc<dyn AudioFetcher>,
        tagger: Arc<dyn CoverTagger>,
        downloads_dir: PathBuf,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            tagger,
            downloads_dir,
        }
    }

    pub(crate) async fn process(
        &self,
        request: &DownloadRequest,
    ) -> Result<DownloadResponse, DownloadProcessError> {
        let track_url = TrackUrl::parse(&request.url)?;

        info!(url = %track_url, quality = request.quality, "Processing download request");

        let metadata = self.resolver.resolve(&track_url).await?;

        debug!(
            title = metadata.title,
            uploader = ?metadata.uploader,
            "Resolved track metadata"
        );

        let basename = filename::output_basename(request.custom_format.as_deref(), &metadata);
        let filename = format!("{}.{}", basename, TARGET_EXTENSION);

        // Request-scoped subdirectory: concurrent requests for identically
        // titled tracks must not race on the same output path.
        let workdir = self.downloads_dir.join(Uuid::new_v4().to_string());
        tokio::fs::create_dir_all(&workdir).await?;

        let packaged = self
            .fetch_and_package(&workdir, &basename, &metadata, request.bitrate())
            .await;

        // Nothing survives the request, on success or failure
        if let Err(error) = tokio::fs::remove_dir_all(&workdir).await {
            warn!(?error, workdir = %workdir.display(), "Unable to remove working directory");
        }

        let download_url = packaged?;

        info!(filename, "Download request completed");

        Ok(DownloadResponse {
            success: true,
            download_url,
            filename,
            title: metadata.title.clone(),
            thumbnail: metadata.thumbnail.clone().unwrap_or_default(),
            uploader: metadata
                .uploader
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            duration: format_duration(metadata.duration_seconds.unwrap_or_default()),
        })
    }

    async fn fetch_and_package(
        &self,
        workdir: &Path,
        basename: &str,
        metadata: &TrackMetadata,
        bitrate: u32,
    ) -> Result<String, DownloadProcessError> {
        let output_base = workdir.join(basename);

        self.fetcher
            .fetch(&metadata.webpage_url, &output_base, bitrate)
            .await?;

        let output_path = workdir.join(format!("{}.{}", basename, TARGET_EXTENSION));

        if !tokio::fs::try_exists(&output_path).await.unwrap_or(false) {
            error!(
                path = %output_path.display(),
                "Converted file is missing after a reported-successful download"
            );
            return Err(DownloadProcessError::OutputFileMissing);
        }

        // The audio itself is the deliverable; tagging failures are logged
        // and swallowed.
        if let Err(error) = self.tagger.embed(&output_path, metadata).await {
            warn!(?error, "Unable to embed tags, returning the file as is");
        }

        let bytes = tokio::fs::read(&output_path).await?;

        Ok(format!(
            "data:audio/mpeg;base64,{}",
            STANDARD.encode(bytes)
        ))
    }
}
