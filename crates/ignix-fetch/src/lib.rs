//! Proxy-aware HTTP transport and the template download pipeline.
//!
//! The transport handle is resolved lazily exactly once per process and
//! reused for every subsequent request. Downloads stream straight to disk
//! and roll back a truncated target when the transfer fails partway.

mod client;
mod download;
mod error;
mod http;
mod listing;

pub use client::{ClientSetting, Transport, USER_AGENT};
pub use download::Downloader;
pub use error::{ClientError, DownloadError, TransportError};
pub use http::{BoxStream, HttpClient, ReqwestClient};
pub use listing::GithubListing;
