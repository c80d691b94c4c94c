//! Remote template catalog: wire types, the listing seam, and the
//! cache-backed catalog client.
//!
//! The catalog is the merged list of selectable template files under one or
//! more remote sub-paths. Listing goes through the [`ListingSource`] trait
//! so the network implementation stays swappable; fetched listings are
//! deduplicated per sub-path through a time-bounded cache.

mod client;
mod entry;
mod error;
mod op;

pub use client::{CatalogClient, ListingSource};
pub use entry::{CatalogEntry, RawEntry, TEMPLATE_SUFFIX};
pub use error::ListingError;
pub use op::{DownloadOp, WriteMode};
