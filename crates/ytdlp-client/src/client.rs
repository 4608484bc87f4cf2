use crate::types::{TrackInfo, YtDlpError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error};

/// Sent with every extractor invocation. Some platforms reject requests
/// carrying the default python user-agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Thin wrapper around the `yt-dlp` binary. Covers the two calls this service
/// needs: info-only metadata extraction and download-plus-transcode.
pub struct YtDlpClient {
    yt_dlp_path: PathBuf,
    ffmpeg_path: PathBuf,
    timeout: Duration,
}

impl YtDlpClient {
    pub fn new(yt_dlp_path: PathBuf, ffmpeg_path: PathBuf, timeout: Duration) -> Self {
        Self {
            yt_dlp_path,
            ffmpeg_path,
            timeout,
        }
    }

    /// Resolves a track URL to its metadata without downloading any media.
    pub async fn resolve(&self, url: &str) -> Result<TrackInfo, YtDlpError> {
        let stdout = self
            .run(&[
                "-J",
                "--no-playlist",
                "--no-warnings",
                "--user-agent",
                BROWSER_USER_AGENT,
                "--geo-bypass",
                url,
            ])
            .await?;

        let info: TrackInfo = serde_json::from_slice(&stdout)?;

        debug!(track_id = info.id, title = info.title, "Resolved track info");

        Ok(info)
    }

    /// Downloads the best audio stream and transcodes it to MP3 at the given
    /// bitrate. The produced file lands at `<output_base>.mp3`.
    pub async fn download(
        &self,
        url: &str,
        output_base: &Path,
        bitrate: u32,
    ) -> Result<(), YtDlpError> {
        let output_template = format!("{}.%(ext)s", output_base.display());
        let audio_quality = format!("{}K", bitrate);
        let ffmpeg_location = self.ffmpeg_path.display().to_string();

        self.run(&[
            "-f",
            "bestaudio/best",
            "--extract-audio",
            "--audio-format",
            "mp3",
            "--audio-quality",
            &audio_quality,
            "--ffmpeg-location",
            &ffmpeg_location,
            "--no-part",
            "--no-playlist",
            "--no-warnings",
            "--user-agent",
            BROWSER_USER_AGENT,
            "--geo-bypass",
            "-o",
            &output_template,
            url,
        ])
        .await?;

        Ok(())
    }

    async fn run(&self, args: &[&str]) -> Result<Vec<u8>, YtDlpError> {
        let child = Command::new(&self.yt_dlp_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // kill_on_drop reaps the child when the timeout wins the race
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                error!(
                    timeout_secs = self.timeout.as_secs(),
                    "Extractor did not finish in time, killing the process"
                );
                return Err(YtDlpError::Timeout(self.timeout.as_secs()));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(%stderr, "Extractor exited with non-zero status");
            return Err(classify_failure(&stderr));
        }

        Ok(output.stdout)
    }
}

/// Maps the extractor's stderr onto a couple of distinguishable errors. The
/// rest is passed through as-is.
pub(crate) fn classify_failure(stderr: &str) -> YtDlpError {
    if stderr.contains("is not a valid URL") {
        return YtDlpError::InvalidUrl;
    }

    if stderr.contains("Unsupported URL") {
        return YtDlpError::UnsupportedSite;
    }

    let message = stderr
        .lines()
        .filter(|line| line.starts_with("ERROR"))
        .last()
        .unwrap_or("extractor failed without an error message")
        .trim()
        .to_string();

    YtDlpError::ExtractorFailed(message)
}
