use serde::Deserialize;

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30u64
}

fn default_downloads_directory() -> String {
    std::env::temp_dir()
        .join("soundloader_downloads")
        .to_string_lossy()
        .to_string()
}

fn default_static_directory() -> String {
    "./static".to_string()
}

fn default_yt_dlp_path() -> String {
    "yt-dlp".to_string()
}

#[cfg(windows)]
fn default_ffmpeg_path() -> String {
    r"C:\ProgramData\chocolatey\bin\ffmpeg.exe".to_string()
}

#[cfg(not(windows))]
fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_extraction_timeout() -> u64 {
    180u64
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    #[serde(default = "default_bind_address")]
    pub(crate) bind_address: String,
    #[serde(default = "default_shutdown_timeout")]
    pub(crate) shutdown_timeout: u64,
    #[serde(default = "default_downloads_directory")]
    pub(crate) downloads_directory: String,
    #[serde(default = "default_static_directory")]
    pub(crate) static_directory: String,
    #[serde(default = "default_yt_dlp_path")]
    pub(crate) yt_dlp_path: String,
    #[serde(default = "default_ffmpeg_path")]
    pub(crate) ffmpeg_path: String,
    /// Upper bound in seconds for a single extractor invocation, applied to
    /// both metadata resolution and the download itself.
    #[serde(default = "default_extraction_timeout")]
    pub(crate) extraction_timeout: u64,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        match envy::from_env::<Self>() {
            Ok(config) => config,
            Err(error) => panic!("Missing environment variable: {:#?}", error),
        }
    }
}
