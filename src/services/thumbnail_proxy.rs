use reqwest::header;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use ytdlp_client::BROWSER_USER_AGENT;

const THUMBNAIL_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Sent so the image CDN treats the request as coming from the platform's
/// own pages, defeating hotlink protection.
const PLATFORM_REFERER: &str = "https://soundcloud.com/";

const FALLBACK_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ThumbnailError {
    #[error("Upstream image host responded with status {0}")]
    UpstreamStatus(StatusCode),
    #[error("Unable to fetch the image: {0}")]
    Request(#[from] reqwest::Error),
}

pub(crate) struct ProxiedImage {
    pub(crate) bytes: Vec<u8>,
    pub(crate) content_type: String,
}

/// Fetches externally hosted thumbnails server-side and relays them with
/// browser-like headers. Responses are never cached.
pub(crate) struct ThumbnailService {
    http_client: reqwest::Client,
}

impl ThumbnailService {
    pub(crate) fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    pub(crate) async fn fetch(&self, url: &str) -> Result<ProxiedImage, ThumbnailError> {
        let response = self
            .http_client
            .get(url)
            .timeout(THUMBNAIL_FETCH_TIMEOUT)
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .header(header::REFERER, PLATFORM_REFERER)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ThumbnailError::UpstreamStatus(response.status()));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| {
                mime_guess::from_path(url)
                    .first()
                    .map(|mime| mime.to_string())
                    .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
            });

        let bytes = response.bytes().await?.to_vec();

        debug!(url, size = bytes.len(), content_type, "Proxied thumbnail");

        Ok(ProxiedImage {
            bytes,
            content_type,
        })
    }
}
