use std::path::PathBuf;

use crate::entry::CatalogEntry;

/// How downloaded content is combined with the local target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Add the template to the end of the file, creating it if absent.
    Append,
    /// Replace the file's content entirely.
    Overwrite,
}

/// A single materialization of one catalog entry into a local file.
///
/// Constructed by the caller once a selection is made and consumed exactly
/// once by the downloader, which hands it back as the success token so the
/// caller can still read the mode, target, and entry for messaging.
#[derive(Debug, Clone)]
pub struct DownloadOp {
    pub mode: WriteMode,
    pub target: PathBuf,
    pub entry: CatalogEntry,
}
