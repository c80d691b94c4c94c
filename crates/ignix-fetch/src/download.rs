//! Streams a selected catalog entry to a local file.

use futures_util::StreamExt;
use ignix_catalog::{DownloadOp, WriteMode};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::DownloadError;
use crate::http::HttpClient;

/// Separator written between existing content and an appended template.
const APPEND_SEPARATOR: &[u8] = b"\n";

/// Downloads catalog entries over an [`HttpClient`].
///
/// No retries happen here; a failed operation is rolled back where that is
/// safe and handed to the caller.
pub struct Downloader<C> {
    client: C,
}

impl<C: HttpClient> Downloader<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Materializes `op.entry` into `op.target` under `op.mode`.
    ///
    /// Overwrite truncates the target up front and deletes it again if the
    /// transfer fails, so no half-written file is left behind. Append
    /// leaves a pre-existing file in place on failure; bytes already
    /// appended may remain. Success is not observable until the file
    /// handle has been flushed and closed; the operation is handed back as
    /// the success token.
    pub async fn download(&self, op: DownloadOp) -> Result<DownloadOp, DownloadError> {
        let mut file = self.open_target(&op).await?;

        let outcome = match self.stream_to(&mut file, &op.entry.url).await {
            Ok(()) => file.flush().await.map_err(DownloadError::Io),
            Err(err) => Err(err),
        };
        drop(file);

        match outcome {
            Ok(()) => {
                debug!(path = %op.target.display(), label = %op.entry.label, "download complete");
                Ok(op)
            }
            Err(err) => {
                if op.mode == WriteMode::Overwrite {
                    self.rollback(&op).await;
                }
                Err(err)
            }
        }
    }

    /// Opens the target according to the write mode.
    ///
    /// In append mode a single separator is written first when the file
    /// already had content, so the template starts on its own line. An
    /// overwrite-mode open failure leaves nothing behind to clean up.
    async fn open_target(&self, op: &DownloadOp) -> Result<File, DownloadError> {
        match op.mode {
            WriteMode::Overwrite => Ok(File::create(&op.target).await?),
            WriteMode::Append => {
                let had_content = tokio::fs::metadata(&op.target)
                    .await
                    .map(|m| m.len() > 0)
                    .unwrap_or(false);
                let mut file = OpenOptions::new()
                    .append(true)
                    .create(true)
                    .open(&op.target)
                    .await?;
                if had_content {
                    file.write_all(APPEND_SEPARATOR).await?;
                }
                Ok(file)
            }
        }
    }

    async fn stream_to(&self, file: &mut File, url: &str) -> Result<(), DownloadError> {
        let mut stream = self
            .client
            .stream(url)
            .await
            .map_err(|e| DownloadError::Transport(e.to_string()))?;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| DownloadError::Transport(e.to_string()))?;
            file.write_all(&chunk).await?;
        }

        Ok(())
    }

    /// Best-effort removal of a truncated target; failure is logged, never
    /// escalated over the primary error.
    async fn rollback(&self, op: &DownloadOp) {
        match tokio::fs::remove_file(&op.target).await {
            Ok(()) => debug!(path = %op.target.display(), "rolled back failed overwrite"),
            Err(err) => warn!(path = %op.target.display(), %err, "rollback failed"),
        }
    }
}
