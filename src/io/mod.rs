//! Archive I/O subsystem.
//!
//! Converts between in-memory notification records and the versioned CSV
//! archive format, and orchestrates the transfer loops around it.
//!
//! # Architecture
//!
//! - [`schema`] — the versioned field-list contract shared by both codec
//!   directions
//! - [`codec`] — CSV encoding and the quote-aware, row-recovering decoder
//! - [`services`] — export (paginated walk, streamed to file) and import
//!   (decode, bulk handoff to the provider)
//!
//! # Examples
//!
//! ## Export to a file
//!
//! ```rust,ignore
//! use notivault::{ExportOptions, ExportService};
//!
//! let service = ExportService::new(provider);
//! let result = service.export_to_file(&path, &ExportOptions::default(), None)?;
//! println!("exported {} notifications", result.exported);
//! ```
//!
//! ## Import an archive
//!
//! ```rust,ignore
//! use notivault::ImportService;
//!
//! let service = ImportService::new(provider);
//! let result = service.import_from_path(&path)?;
//! println!("imported {} notifications", result.imported);
//! ```

pub mod codec;
pub mod schema;
pub mod services;

// Re-exports for convenience
pub use codec::{CsvArchiveWriter, DecodedArchive, decode, encode_to_string};
pub use schema::SchemaVersion;
pub use services::export::{ExportOptions, ExportResult, ExportService};
pub use services::import::{ImportResult, ImportService};
