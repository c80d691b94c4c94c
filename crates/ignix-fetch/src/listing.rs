//! GitHub contents-API listing source.

use std::sync::Arc;

use ignix_catalog::{ListingError, ListingSource, RawEntry};
use serde::Deserialize;
use tracing::debug;

use crate::client::Transport;

/// Repository whose files make up the template catalog.
const DEFAULT_REPO: &str = "github/gitignore";
const API_ROOT: &str = "https://api.github.com/repos";
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Error body shape of the listing endpoint.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Lists a repository's files through the GitHub contents API.
pub struct GithubListing {
    transport: Arc<Transport>,
    repo: String,
}

impl GithubListing {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self::for_repo(transport, DEFAULT_REPO)
    }

    pub fn for_repo(transport: Arc<Transport>, repo: impl Into<String>) -> Self {
        Self {
            transport,
            repo: repo.into(),
        }
    }

    fn contents_url(&self, sub_path: &str) -> String {
        if sub_path.is_empty() {
            format!("{API_ROOT}/{}/contents", self.repo)
        } else {
            format!("{API_ROOT}/{}/contents/{sub_path}", self.repo)
        }
    }
}

impl ListingSource for GithubListing {
    async fn list(&self, sub_path: &str) -> Result<Vec<RawEntry>, ListingError> {
        let url = self.contents_url(sub_path);
        let client = self
            .transport
            .handle()
            .map_err(|e| ListingError::new(None, e.to_string()))?;

        let response = client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| ListingError::new(None, e.to_string()))?;

        if let Some(remaining) = response
            .headers()
            .get(RATE_LIMIT_REMAINING)
            .and_then(|v| v.to_str().ok())
        {
            debug!(remaining, url = %url, "listing rate limit");
        }

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiMessage>()
                .await
                .map(|m| m.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(ListingError::new(Some(status.as_u16()), message));
        }

        response
            .json::<Vec<RawEntry>>()
            .await
            .map_err(|e| ListingError::new(None, e.to_string()))
    }
}
