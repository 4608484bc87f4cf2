use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_BITRATE: u32 = 192;

fn default_quality() -> String {
    DEFAULT_BITRATE.to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct DownloadRequest {
    #[serde(default)]
    pub(crate) url: String,
    #[serde(default = "default_quality")]
    pub(crate) quality: String,
    #[serde(default)]
    pub(crate) custom_format: Option<String>,
}

impl DownloadRequest {
    /// Target MP3 bitrate in kbit/s. Out-of-range or non-numeric values fall
    /// back to the default.
    pub(crate) fn bitrate(&self) -> u32 {
        self.quality
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|bitrate| (32..=320).contains(bitrate))
            .unwrap_or(DEFAULT_BITRATE)
    }
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct DownloadResponse {
    pub(crate) success: bool,
    pub(crate) download_url: String,
    pub(crate) filename: String,
    pub(crate) title: String,
    pub(crate) thumbnail: String,
    pub(crate) uploader: String,
    pub(crate) duration: String,
}
