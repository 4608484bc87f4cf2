mod client;
mod types;

pub use client::{YtDlpClient, BROWSER_USER_AGENT};
pub use types::{TrackInfo, YtDlpError};
