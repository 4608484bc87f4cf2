use crate::services::download_processor::{
    AudioFetcher, FetchError, ResolveError, TrackResolver,
};
use crate::types::{TrackMetadata, TrackUrl};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use ytdlp_client::{TrackInfo, YtDlpClient, YtDlpError};

const PLATFORM_HOMEPAGE: &str = "https://soundcloud.com/";
const SESSION_PRIMING_TIMEOUT: Duration = Duration::from_secs(10);

impl From<TrackInfo> for TrackMetadata {
    fn from(info: TrackInfo) -> Self {
        Self {
            id: info.id,
            title: info.title,
            uploader: info.uploader,
            artist: info.artist,
            album: info.album,
            duration_seconds: info.duration.map(|seconds| seconds.round() as u64),
            thumbnail: info.thumbnail,
            webpage_url: info.webpage_url,
        }
    }
}

impl From<YtDlpError> for ResolveError {
    fn from(error: YtDlpError) -> Self {
        match error {
            YtDlpError::InvalidUrl => ResolveError::InvalidUrl,
            YtDlpError::UnsupportedSite => ResolveError::UnsupportedSite,
            YtDlpError::Timeout(_) => ResolveError::Timeout,
            other => ResolveError::Extraction(other.to_string()),
        }
    }
}

impl From<YtDlpError> for FetchError {
    fn from(error: YtDlpError) -> Self {
        match error {
            YtDlpError::Timeout(_) => FetchError::Timeout,
            other => FetchError::Transcode(other.to_string()),
        }
    }
}

/// Metadata resolver backed by the yt-dlp wrapper. Warms the cookie jar
/// against the platform homepage first; that step is best-effort and its
/// failure never aborts the request.
pub(crate) struct YtDlpResolver {
    client: Arc<YtDlpClient>,
    http_client: reqwest::Client,
}

impl YtDlpResolver {
    pub(crate) fn new(client: Arc<YtDlpClient>, http_client: reqwest::Client) -> Self {
        Self {
            client,
            http_client,
        }
    }

    async fn prime_session(&self) {
        let result = self
            .http_client
            .get(PLATFORM_HOMEPAGE)
            .timeout(SESSION_PRIMING_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) => {
                debug!(status = %response.status(), "Primed session against platform homepage")
            }
            Err(error) => warn!(?error, "Session priming failed, continuing without it"),
        }
    }
}

#[async_trait]
impl TrackResolver for YtDlpResolver {
    async fn resolve(&self, url: &TrackUrl) -> Result<TrackMetadata, ResolveError> {
        self.prime_session().await;

        let info = self.client.resolve(url.as_str()).await?;

        Ok(info.into())
    }
}

/// Download-and-transcode backed by the yt-dlp wrapper.
pub(crate) struct YtDlpFetcher {
    client: Arc<YtDlpClient>,
}

impl YtDlpFetcher {
    pub(crate) fn new(client: Arc<YtDlpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AudioFetcher for YtDlpFetcher {
    async fn fetch(
        &self,
        webpage_url: &str,
        output_base: &Path,
        bitrate: u32,
    ) -> Result<(), FetchError> {
        self.client
            .download(webpage_url, output_base, bitrate)
            .await?;

        Ok(())
    }
}
