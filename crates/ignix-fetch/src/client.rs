//! Proxy resolution and the build-once HTTP client handle.

use std::env;

use once_cell::sync::OnceCell;
use reqwest::{Client, Proxy};

use crate::error::ClientError;

/// Client identifier sent with every outbound request.
pub const USER_AGENT: &str = concat!("ignix/", env!("CARGO_PKG_VERSION"));

/// Environment variables consulted when no proxy is configured, in order.
const PROXY_ENV_VARS: &[&str] = &["HTTPS_PROXY", "https_proxy", "HTTP_PROXY", "http_proxy"];

/// Transport configuration supplied by the caller at startup.
#[derive(Debug, Clone, Default)]
pub struct ClientSetting {
    /// Explicitly configured proxy URL; takes precedence over the
    /// environment.
    pub proxy: Option<String>,
}

impl ClientSetting {
    /// Resolves the proxy endpoint to use, if any: the configured URL when
    /// non-empty, else the first non-empty proxy environment variable.
    pub fn resolve_proxy(&self) -> Option<String> {
        self.resolve_proxy_with(|key| env::var(key).ok())
    }

    fn resolve_proxy_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.proxy
            .clone()
            .filter(|url| !url.is_empty())
            .or_else(|| {
                PROXY_ENV_VARS
                    .iter()
                    .filter_map(|key| lookup(key))
                    .find(|url| !url.is_empty())
            })
    }

    /// Builds the HTTP client, tunneling through the resolved proxy when
    /// one is present.
    pub fn build(&self) -> Result<Client, ClientError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);

        if let Some(url) = self.resolve_proxy() {
            let proxy = Proxy::all(&url).map_err(|source| ClientError::Proxy {
                url: url.clone(),
                source,
            })?;
            builder = builder.proxy(proxy);
        }

        builder.build().map_err(ClientError::Build)
    }
}

/// Shared transport: the client is built on first use and reused for every
/// request afterwards.
pub struct Transport {
    setting: ClientSetting,
    client: OnceCell<Client>,
}

impl Transport {
    pub fn new(setting: ClientSetting) -> Self {
        Self {
            setting,
            client: OnceCell::new(),
        }
    }

    /// Returns the shared client, building it on first call.
    ///
    /// The cell guarantees a single construction even under concurrent
    /// first use. A malformed proxy URL fails construction and is surfaced
    /// to the caller unretried.
    pub fn handle(&self) -> Result<&Client, ClientError> {
        self.client.get_or_try_init(|| self.setting.build())
    }
}
