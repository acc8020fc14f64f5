//! The external notification provider boundary.
//!
//! Notification capture and storage live outside this crate, behind the
//! [`NotificationProvider`] trait. Notivault consumes the trait; it never
//! implements the capture side. [`MemoryProvider`] is the in-memory
//! reference implementation used by tests and examples.
//!
//! Real-time delivery (the provider's notification-posted event stream) is
//! out of scope here; consumers that need it subscribe at the plugin layer.

mod memory;
mod pager;

pub use memory::MemoryProvider;
pub use pager::{PageWalker, ProgressCallback};

use crate::models::{NotificationFilter, NotificationRecord};
use crate::Result;
use serde::{Deserialize, Serialize};

/// A single page request against the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    /// Exclusive pagination cursor: the timestamp of the last record of the
    /// previous page. `None` fetches from the start of the provider's
    /// ordering.
    #[serde(default)]
    pub cursor: Option<i64>,
    /// Maximum number of records to return.
    pub limit: usize,
    /// Optional filter applied provider-side.
    #[serde(default)]
    pub filter: Option<NotificationFilter>,
}

/// One page of notifications returned by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPage {
    /// The records of this page, in the provider's stable ordering.
    pub notifications: Vec<NotificationRecord>,
}

/// The query interface of the external notification store.
///
/// Implementations must return pages in one stable, cursor-compatible
/// ordering (typically newest-first): given the cursor taken from the last
/// record of a page, the next page continues strictly past it. The walk in
/// [`PageWalker`] relies on that and on an empty page marking the end.
pub trait NotificationProvider {
    /// Fetches one page of notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be queried. A page
    /// error is fatal to the walk in progress.
    fn get_notifications(&self, query: &NotificationQuery) -> Result<NotificationPage>;

    /// Returns the total number of stored notifications, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be queried.
    fn total_count(&self) -> Result<u64>;

    /// Stores the given records in one bulk call.
    ///
    /// Atomicity, if any, is owned by the provider; there is no
    /// partial-commit or rollback on this side.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects or fails the bulk write.
    fn import_notifications(&self, records: &[NotificationRecord]) -> Result<()>;

    /// Deletes every stored notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be modified.
    fn delete_all(&self) -> Result<()>;
}
