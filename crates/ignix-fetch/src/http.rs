//! HTTP client seam used by the downloader.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};

use crate::client::Transport;
use crate::error::TransportError;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Asynchronous HTTP client abstraction.
///
/// The minimal surface the downloader needs. The production implementation
/// is [`ReqwestClient`]; tests substitute mocks that fail on request or
/// mid-stream.
pub trait HttpClient: Send + Sync {
    /// Error type for HTTP operations.
    type Error: std::error::Error + Send + 'static;

    /// Open a streaming connection and return the response body.
    ///
    /// Non-success HTTP statuses are reported as errors, not as bodies.
    fn stream(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<BoxStream<'static, Result<Bytes, Self::Error>>, Self::Error>> + Send;
}

/// Production HTTP client backed by the shared [`Transport`] handle.
pub struct ReqwestClient {
    transport: Arc<Transport>,
}

impl ReqwestClient {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }
}

impl HttpClient for ReqwestClient {
    type Error = TransportError;

    async fn stream(
        &self,
        url: &str,
    ) -> Result<BoxStream<'static, Result<Bytes, Self::Error>>, Self::Error> {
        let client = self.transport.handle()?;
        let response = client.get(url).send().await?.error_for_status()?;
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(TransportError::Http));
        Ok(Box::pin(stream))
    }
}
