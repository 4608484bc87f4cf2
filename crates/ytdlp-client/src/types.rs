use serde::Deserialize;

/// Track metadata as reported by `yt-dlp -J`. Fields the extractor may omit
/// for some tracks are optional.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TrackInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub webpage_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum YtDlpError {
    #[error("The link is not a valid URL")]
    InvalidUrl,
    #[error("The link points to a site the extractor does not support")]
    UnsupportedSite,
    #[error("The extractor did not finish within {0} seconds")]
    Timeout(u64),
    #[error("The extractor exited with an error: {0}")]
    ExtractorFailed(String),
    #[error("Unable to parse the extractor output: {0}")]
    MalformedOutput(#[from] serde_json::Error),
    #[error("Unable to run the extractor process: {0}")]
    Process(#[from] std::io::Error),
}
