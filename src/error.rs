use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure of an asynchronous clipboard write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard not available")]
    Unavailable,
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

/// Failure to fetch an authenticated download.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid download url {href}: {reason}")]
    InvalidUrl { href: String, reason: String },
    #[error("download failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("download request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
