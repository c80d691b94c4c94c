//! Error types for ignix-catalog.

use thiserror::Error;

/// A failed remote listing request, carrying whatever the upstream
/// reported. Listing failures are surfaced to the caller and never cached.
#[derive(Debug, Clone, Error)]
#[error("remote listing failed: {message}")]
pub struct ListingError {
    /// Upstream HTTP status, when the failure was a non-success response.
    pub status: Option<u16>,
    pub message: String,
}

impl ListingError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}
