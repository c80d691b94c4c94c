//! Cache-backed catalog listing.

use std::future::Future;

use futures_util::future::try_join_all;
use ignix_cache::TtlCache;
use tracing::debug;

use crate::entry::{CatalogEntry, RawEntry};
use crate::error::ListingError;

/// Namespace prefix for cache keys, so a sub-path can never collide with
/// keys another component might add to a shared cache.
const CACHE_NAMESPACE: &str = "catalog/";

/// Source of raw listing entries for a remote sub-path.
///
/// The production implementation issues the remote listing request; tests
/// substitute fakes that count calls or fail on demand.
pub trait ListingSource: Send + Sync {
    fn list(
        &self,
        sub_path: &str,
    ) -> impl Future<Output = Result<Vec<RawEntry>, ListingError>> + Send;
}

/// Lists remote template files, deduplicating remote calls through a
/// time-bounded cache.
pub struct CatalogClient<S> {
    source: S,
    cache: TtlCache<Vec<CatalogEntry>>,
}

impl<S: ListingSource> CatalogClient<S> {
    pub fn new(source: S, cache: TtlCache<Vec<CatalogEntry>>) -> Self {
        Self { source, cache }
    }

    /// Lists the template entries under one remote sub-path. The empty
    /// sub-path denotes the repository root.
    ///
    /// A cache hit returns immediately with no remote I/O. On a miss the
    /// remote listing is fetched, filtered to template files, mapped, and
    /// stored under the sub-path's key. Failures are never cached.
    pub async fn list_entries(&self, sub_path: &str) -> Result<Vec<CatalogEntry>, ListingError> {
        let key = format!("{CACHE_NAMESPACE}{sub_path}");
        if let Some(entries) = self.cache.get(&key) {
            debug!(sub_path, count = entries.len(), "catalog cache hit");
            return Ok(entries);
        }

        let raw = self.source.list(sub_path).await?;
        let entries: Vec<CatalogEntry> = raw
            .into_iter()
            .filter_map(CatalogEntry::from_raw)
            .collect();
        debug!(sub_path, count = entries.len(), "catalog fetched");
        self.cache.put(key, entries.clone());
        Ok(entries)
    }

    /// Lists and merges the entries of several sub-paths, sorted ascending
    /// by label (case-insensitive).
    ///
    /// Each sub-path is cached independently; the fetches run without a
    /// required relative order and the merge waits for all of them, so the
    /// result is deterministic for fixed inputs. Duplicate labels across
    /// sub-paths are preserved as separate entries.
    pub async fn list_merged(&self, sub_paths: &[&str]) -> Result<Vec<CatalogEntry>, ListingError> {
        let per_path = try_join_all(sub_paths.iter().map(|p| self.list_entries(p))).await?;
        let mut merged: Vec<CatalogEntry> = per_path.into_iter().flatten().collect();
        merged.sort_by_key(|entry| entry.label.to_lowercase());
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FakeSource {
        calls: AtomicUsize,
        fail_remaining: AtomicUsize,
        listings: HashMap<String, Vec<RawEntry>>,
    }

    impl FakeSource {
        fn new(listings: Vec<(&str, Vec<&str>)>) -> Self {
            let listings = listings
                .into_iter()
                .map(|(sub_path, names)| {
                    let entries = names.into_iter().map(|n| file_entry(sub_path, n)).collect();
                    (sub_path.to_string(), entries)
                })
                .collect();
            Self {
                calls: AtomicUsize::new(0),
                fail_remaining: AtomicUsize::new(0),
                listings,
            }
        }

        fn failing_first(mut self, failures: usize) -> Self {
            self.fail_remaining = AtomicUsize::new(failures);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn file_entry(sub_path: &str, name: &str) -> RawEntry {
        let path = if sub_path.is_empty() {
            name.to_string()
        } else {
            format!("{sub_path}/{name}")
        };
        RawEntry {
            name: name.to_string(),
            path: path.clone(),
            download_url: Some(format!("https://raw.example/{path}")),
            kind: "file".to_string(),
        }
    }

    impl ListingSource for FakeSource {
        async fn list(&self, sub_path: &str) -> Result<Vec<RawEntry>, ListingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_remaining.load(Ordering::SeqCst) > 0 {
                self.fail_remaining.fetch_sub(1, Ordering::SeqCst);
                return Err(ListingError::new(Some(503), "service unavailable"));
            }
            Ok(self.listings.get(sub_path).cloned().unwrap_or_default())
        }
    }

    fn client(source: FakeSource, ttl: Duration) -> CatalogClient<FakeSource> {
        CatalogClient::new(source, TtlCache::new(ttl))
    }

    #[tokio::test]
    async fn test_cache_hit_skips_remote_call() {
        let c = client(
            FakeSource::new(vec![("", vec!["Rust.gitignore"])]),
            Duration::from_secs(3600),
        );
        c.list_entries("").await.unwrap();
        let again = c.list_entries("").await.unwrap();
        assert_eq!(again.len(), 1);
        assert_eq!(c.source.calls(), 1);
    }

    #[tokio::test]
    async fn test_sub_paths_cache_independently() {
        let c = client(
            FakeSource::new(vec![
                ("", vec!["Rust.gitignore"]),
                ("Global", vec!["macOS.gitignore"]),
            ]),
            Duration::from_secs(3600),
        );
        c.list_entries("").await.unwrap();
        c.list_entries("Global").await.unwrap();
        c.list_entries("").await.unwrap();
        c.list_entries("Global").await.unwrap();
        assert_eq!(c.source.calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_fetches() {
        let c = client(
            FakeSource::new(vec![("", vec!["Rust.gitignore"])]),
            Duration::ZERO,
        );
        c.list_entries("").await.unwrap();
        c.list_entries("").await.unwrap();
        assert_eq!(c.source.calls(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let c = client(
            FakeSource::new(vec![("", vec!["Rust.gitignore"])]).failing_first(1),
            Duration::from_secs(3600),
        );
        let err = c.list_entries("").await.unwrap_err();
        assert_eq!(err.status, Some(503));

        // the failure was not stored, so the retry reaches the source again
        let entries = c.list_entries("").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(c.source.calls(), 2);

        // and the success is cached
        c.list_entries("").await.unwrap();
        assert_eq!(c.source.calls(), 2);
    }

    #[tokio::test]
    async fn test_mapping_filters_non_template_entries() {
        let mut source = FakeSource::new(vec![]);
        source.listings.insert(
            String::new(),
            vec![
                file_entry("", "Rust.gitignore"),
                RawEntry {
                    name: "community".to_string(),
                    path: "community".to_string(),
                    download_url: None,
                    kind: "dir".to_string(),
                },
                RawEntry {
                    name: "README.md".to_string(),
                    path: "README.md".to_string(),
                    download_url: Some("https://raw.example/README.md".to_string()),
                    kind: "file".to_string(),
                },
            ],
        );
        let c = client(source, Duration::from_secs(3600));
        let entries = c.list_entries("").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "Rust");
    }

    #[tokio::test]
    async fn test_merged_is_sorted_case_insensitively() {
        let c = client(
            FakeSource::new(vec![
                ("", vec!["Node.gitignore"]),
                ("Global", vec!["macOS.gitignore", "Android.gitignore"]),
            ]),
            Duration::from_secs(3600),
        );
        let merged = c.list_merged(&["", "Global"]).await.unwrap();
        let labels: Vec<&str> = merged.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["Android", "macOS", "Node"]);
    }

    #[tokio::test]
    async fn test_merged_preserves_duplicate_labels() {
        let c = client(
            FakeSource::new(vec![
                ("", vec!["Vim.gitignore"]),
                ("Global", vec!["Vim.gitignore"]),
            ]),
            Duration::from_secs(3600),
        );
        let merged = c.list_merged(&["", "Global"]).await.unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].label, "Vim");
        assert_eq!(merged[1].label, "Vim");
        assert_ne!(merged[0].description, merged[1].description);
    }

    #[tokio::test]
    async fn test_merged_propagates_listing_failure() {
        let c = client(
            FakeSource::new(vec![("", vec!["Rust.gitignore"])]).failing_first(usize::MAX),
            Duration::from_secs(3600),
        );
        let err = c.list_merged(&["", "Global"]).await.unwrap_err();
        assert_eq!(err.status, Some(503));
    }

    #[tokio::test]
    async fn test_expired_sub_path_is_refetched_once() {
        // a zero TTL expires every entry immediately, standing in for the
        // elapsed window; each call issues exactly one new remote request
        let c = client(
            FakeSource::new(vec![("", vec!["Rust.gitignore"])]),
            Duration::ZERO,
        );
        c.list_entries("").await.unwrap();
        c.list_entries("").await.unwrap();
        c.list_entries("").await.unwrap();
        assert_eq!(c.source.calls(), 3);
    }
}
