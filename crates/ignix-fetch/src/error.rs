//! Error types for ignix-fetch.

use thiserror::Error;

/// Transport construction failure: the proxy configuration could not be
/// turned into a usable client. Surfaced to the first caller, not retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid proxy URL {url}: {source}")]
    Proxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Request-level failure of the production HTTP client.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// A failed download, surfaced after rollback has run for overwrite mode.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("transfer failed: {0}")]
    Transport(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}
