//! # Notivault
//!
//! Bulk export and import of device notification histories as versioned
//! CSV archives.
//!
//! Notification capture, storage, and querying live in an external
//! provider (typically a native notification-listener plugin). Notivault
//! is the transfer mechanism on top of it:
//!
//! - A cursor-paginated walk over the provider's notification store
//! - A schema-versioned CSV codec with lenient per-row recovery
//! - Export and import services that tie the two together
//!
//! ## Example
//!
//! ```rust,ignore
//! use notivault::{ExportOptions, ExportService};
//! use std::sync::Arc;
//!
//! let service = ExportService::new(provider);
//! let result = service.export_to_file(path, &ExportOptions::default(), None)?;
//! println!("exported {} notifications", result.exported);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod io;
pub mod models;
pub mod provider;

// Re-exports for convenience
pub use config::VaultConfig;
pub use io::codec::{CsvArchiveWriter, DecodedArchive, decode, encode_to_string};
pub use io::schema::SchemaVersion;
pub use io::services::export::{ExportOptions, ExportResult, ExportService, export_file_name};
pub use io::services::import::{ImportResult, ImportService};
pub use models::{NotificationFilter, NotificationRecord};
pub use provider::{
    MemoryProvider, NotificationPage, NotificationProvider, NotificationQuery, PageWalker,
    ProgressCallback,
};

/// Error type for notivault operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed archive (missing header/data rows), unknown schema, zero valid records |
/// | `Provider` | A provider call (page fetch, count, bulk import, delete) fails |
/// | `OperationFailed` | Filesystem I/O errors, configuration parse failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - An archive has fewer than a header row and one data row
    /// - The archive header does not match any known schema version
    /// - Every data row was rejected during decoding
    /// - A configuration value cannot be parsed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A provider call failed.
    ///
    /// Raised when the external notification provider rejects or fails a
    /// page fetch, count query, bulk import, or delete-all call. Fatal to
    /// the export or import in flight; nothing partial is persisted.
    #[error("provider call '{operation}' failed: {cause}")]
    Provider {
        /// The provider operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur (create, open, read, write)
    /// - The configuration file cannot be read
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for notivault operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::Provider {
            operation: "get_notifications".to_string(),
            cause: "plugin unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "provider call 'get_notifications' failed: plugin unavailable"
        );

        let err = Error::OperationFailed {
            operation: "open_archive".to_string(),
            cause: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "operation 'open_archive' failed: not found"
        );
    }
}
