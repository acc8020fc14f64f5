//! In-memory notification provider.

use super::{NotificationPage, NotificationProvider, NotificationQuery};
use crate::models::NotificationRecord;
use crate::{Error, Result};
use std::sync::{Mutex, MutexGuard};

/// An in-memory [`NotificationProvider`] holding records newest-first.
///
/// The cursor is an exclusive upper bound: a page request with
/// `cursor = Some(t)` returns records strictly older than `t`. Records that
/// share a timestamp with the cursor are therefore skipped; providers with
/// millisecond clocks make that collision effectively impossible, and the
/// walker inherits whatever the provider decides.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    records: Mutex<Vec<NotificationRecord>>,
}

impl MemoryProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider seeded with the given records.
    #[must_use]
    pub fn with_records(records: Vec<NotificationRecord>) -> Self {
        let provider = Self::new();
        if let Ok(mut store) = provider.records.lock() {
            *store = records;
            store.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }
        provider
    }

    /// Returns a copy of every stored record, newest-first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store lock is poisoned.
    pub fn snapshot(&self) -> Result<Vec<NotificationRecord>> {
        Ok(self.store()?.clone())
    }

    fn store(&self) -> Result<MutexGuard<'_, Vec<NotificationRecord>>> {
        self.records.lock().map_err(|_| Error::OperationFailed {
            operation: "lock_store".to_string(),
            cause: "poisoned lock".to_string(),
        })
    }
}

impl NotificationProvider for MemoryProvider {
    fn get_notifications(&self, query: &NotificationQuery) -> Result<NotificationPage> {
        let store = self.store()?;
        let notifications = store
            .iter()
            .filter(|r| query.cursor.is_none_or(|cursor| r.timestamp < cursor))
            .filter(|r| query.filter.as_ref().is_none_or(|f| f.matches(r)))
            .take(query.limit)
            .cloned()
            .collect();
        Ok(NotificationPage { notifications })
    }

    fn total_count(&self) -> Result<u64> {
        Ok(self.store()?.len() as u64)
    }

    fn import_notifications(&self, records: &[NotificationRecord]) -> Result<()> {
        let mut store = self.store()?;
        store.extend_from_slice(records);
        store.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        self.store()?.clear();
        Ok(())
    }
}
