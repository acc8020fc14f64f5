//! Cursor-paginated walk over a notification provider.

use super::{NotificationProvider, NotificationQuery};
use crate::models::{NotificationFilter, NotificationRecord};
use crate::Result;
use tracing::debug;

/// Progress callback invoked after each fetched page with
/// `(items_so_far, total_known)`.
///
/// `total_known` is the result of one up-front count query, or `None` when
/// the count was unavailable.
pub type ProgressCallback = Box<dyn Fn(u64, Option<u64>) + Send>;

/// Walks a provider's notification store page by page.
///
/// The cursor starts unset and, after every non-empty page, advances to the
/// timestamp of the last record of that page. The walk ends at the first
/// empty page. There is no iteration cap: a provider that keeps returning
/// records keeps the walk alive, which is acceptable for the single-user,
/// bounded-dataset stores this targets.
///
/// Any page-fetch error aborts the walk and propagates to the caller;
/// whatever was accumulated before the error is dropped with it.
pub struct PageWalker<'a> {
    provider: &'a dyn NotificationProvider,
    page_size: usize,
    filter: Option<NotificationFilter>,
    progress: Option<ProgressCallback>,
    total_known: Option<u64>,
}

impl<'a> PageWalker<'a> {
    /// Creates a walker over the given provider.
    #[must_use]
    pub const fn new(provider: &'a dyn NotificationProvider, page_size: usize) -> Self {
        Self {
            provider,
            page_size,
            filter: None,
            progress: None,
            total_known: None,
        }
    }

    /// Sets the filter forwarded with every page request.
    #[must_use]
    pub fn with_filter(mut self, filter: NotificationFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the progress callback.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Supplies an already-fetched total so the walker skips its own count
    /// query.
    #[must_use]
    pub const fn with_total(mut self, total: u64) -> Self {
        self.total_known = Some(total);
        self
    }

    /// Fetches every page and returns the accumulated records in provider
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails; nothing is returned from a
    /// partial walk.
    pub fn fetch_all(&self) -> Result<Vec<NotificationRecord>> {
        let mut records = Vec::new();
        self.for_each_page(|page| {
            records.extend(page);
            Ok(())
        })?;
        Ok(records)
    }

    /// Fetches pages one at a time and hands each to `handle`, returning the
    /// total number of records seen.
    ///
    /// This is the streaming counterpart of [`fetch_all`]: pages can be
    /// written out as they arrive instead of accumulating in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if a page fetch or the handler fails.
    ///
    /// [`fetch_all`]: PageWalker::fetch_all
    pub fn for_each_page<F>(&self, mut handle: F) -> Result<u64>
    where
        F: FnMut(Vec<NotificationRecord>) -> Result<()>,
    {
        let total = self.resolve_total();
        let mut cursor: Option<i64> = None;
        let mut seen: u64 = 0;

        loop {
            let page = self.provider.get_notifications(&NotificationQuery {
                cursor,
                limit: self.page_size,
                filter: self.filter.clone(),
            })?;

            if page.notifications.is_empty() {
                break;
            }

            if let Some(last) = page.notifications.last() {
                cursor = Some(last.timestamp);
            }
            seen += page.notifications.len() as u64;
            debug!(page_len = page.notifications.len(), seen, "fetched page");

            if let Some(cb) = &self.progress {
                cb(seen, total);
            }

            handle(page.notifications)?;
        }

        Ok(seen)
    }

    /// Resolves the total for progress reporting. The count query is only
    /// issued when someone is listening; a count failure degrades to an
    /// unknown total rather than aborting the walk.
    fn resolve_total(&self) -> Option<u64> {
        if self.total_known.is_some() {
            return self.total_known;
        }
        if self.progress.is_none() {
            return None;
        }
        self.provider.total_count().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MemoryProvider, NotificationPage};
    use crate::Error;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(id: &str, ts: i64) -> NotificationRecord {
        NotificationRecord::new(id, "Mail", "com.example.mail", ts)
    }

    fn seeded(n: i64) -> MemoryProvider {
        MemoryProvider::with_records((0..n).map(|i| record(&format!("n{i}"), i)).collect())
    }

    /// Counts calls while delegating to an inner provider.
    struct CountingProvider<P> {
        inner: P,
        calls: AtomicUsize,
    }

    impl<P> CountingProvider<P> {
        fn new(inner: P) -> Self {
            Self {
                inner,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl<P: NotificationProvider> NotificationProvider for CountingProvider<P> {
        fn get_notifications(&self, query: &NotificationQuery) -> Result<NotificationPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get_notifications(query)
        }

        fn total_count(&self) -> Result<u64> {
            self.inner.total_count()
        }

        fn import_notifications(&self, records: &[NotificationRecord]) -> Result<()> {
            self.inner.import_notifications(records)
        }

        fn delete_all(&self) -> Result<()> {
            self.inner.delete_all()
        }
    }

    /// Fails every page fetch after the first.
    struct FlakyProvider {
        inner: MemoryProvider,
        calls: AtomicUsize,
    }

    impl NotificationProvider for FlakyProvider {
        fn get_notifications(&self, query: &NotificationQuery) -> Result<NotificationPage> {
            if self.calls.fetch_add(1, Ordering::SeqCst) >= 1 {
                return Err(Error::Provider {
                    operation: "get_notifications".to_string(),
                    cause: "listener disconnected".to_string(),
                });
            }
            self.inner.get_notifications(query)
        }

        fn total_count(&self) -> Result<u64> {
            self.inner.total_count()
        }

        fn import_notifications(&self, records: &[NotificationRecord]) -> Result<()> {
            self.inner.import_notifications(records)
        }

        fn delete_all(&self) -> Result<()> {
            self.inner.delete_all()
        }
    }

    #[test]
    fn test_walk_issues_full_pages_plus_terminating_call() {
        // 250 records at page size 100: 100, 100, 50, then the empty page.
        let provider = CountingProvider::new(seeded(250));
        let records = PageWalker::new(&provider, 100).fetch_all().unwrap();
        assert_eq!(records.len(), 250);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_walk_exact_multiple_still_fetches_empty_page() {
        let provider = CountingProvider::new(seeded(200));
        let records = PageWalker::new(&provider, 100).fetch_all().unwrap();
        assert_eq!(records.len(), 200);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_walk_empty_store_is_single_call() {
        let provider = CountingProvider::new(MemoryProvider::new());
        let records = PageWalker::new(&provider, 100).fetch_all().unwrap();
        assert!(records.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_walk_preserves_provider_order() {
        let provider = seeded(25);
        let records = PageWalker::new(&provider, 10).fetch_all().unwrap();
        let timestamps: Vec<i64> = records.iter().map(|r| r.timestamp).collect();
        let expected: Vec<i64> = (0..25).rev().collect();
        assert_eq!(timestamps, expected);
    }

    #[test]
    fn test_page_error_aborts_walk() {
        let provider = FlakyProvider {
            inner: seeded(30),
            calls: AtomicUsize::new(0),
        };
        let result = PageWalker::new(&provider, 10).fetch_all();
        assert!(matches!(result, Err(Error::Provider { .. })));
    }

    #[test]
    fn test_progress_reports_running_count_and_total() {
        let provider = seeded(25);
        let updates = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&updates);

        let walker = PageWalker::new(&provider, 10).with_progress(Box::new(move |seen, total| {
            if let Ok(mut u) = sink.lock() {
                u.push((seen, total));
            }
        }));
        walker.fetch_all().unwrap();

        let updates = updates.lock().unwrap().clone();
        assert_eq!(
            updates,
            vec![(10, Some(25)), (20, Some(25)), (25, Some(25))]
        );
    }

    #[test]
    fn test_filter_travels_with_every_page_request() {
        let mut records: Vec<NotificationRecord> =
            (0..10).map(|i| record(&format!("m{i}"), i)).collect();
        records.extend((10..20).map(|i| {
            NotificationRecord::new(format!("o{i}"), "Maps", "com.example.maps", i)
        }));
        let provider = MemoryProvider::with_records(records);

        let walker = PageWalker::new(&provider, 3)
            .with_filter(NotificationFilter::new().with_app_name("Mail"));
        let fetched = walker.fetch_all().unwrap();
        assert_eq!(fetched.len(), 10);
        assert!(fetched.iter().all(|r| r.app_name == "Mail"));
    }
}
