//! Data model for notification records and filters.

mod filter;
mod notification;

pub use filter::NotificationFilter;
pub use notification::NotificationRecord;
