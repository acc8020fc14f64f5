//! Notification import service.
//!
//! Reads an archive, decodes it, and hands the full record sequence to the
//! provider in one bulk call. Atomicity of the bulk write, if any, belongs
//! to the provider.

use crate::io::codec::{self, DecodedArchive};
use crate::io::schema::SchemaVersion;
use crate::provider::NotificationProvider;
use crate::{Error, Result};
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of an import operation.
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// Number of records handed to the provider.
    pub imported: usize,
    /// Number of data rows skipped during decoding.
    pub skipped_rows: usize,
    /// Total data rows the archive carried.
    pub total_rows: usize,
    /// Schema revision the archive was written with.
    pub schema: SchemaVersion,
    /// Warnings collected while decoding.
    pub warnings: Vec<String>,
}

impl ImportResult {
    /// Returns whether any records were imported.
    #[must_use]
    pub const fn has_imports(&self) -> bool {
        self.imported > 0
    }

    fn from_archive(archive: DecodedArchive) -> Self {
        Self {
            imported: archive.records.len(),
            skipped_rows: archive.skipped_rows,
            total_rows: archive.total_rows(),
            schema: archive.schema,
            warnings: archive.warnings,
        }
    }
}

/// Service for importing CSV archives into the provider's store.
pub struct ImportService {
    provider: Arc<dyn NotificationProvider>,
}

impl ImportService {
    /// Creates a new import service.
    #[must_use]
    pub fn new(provider: Arc<dyn NotificationProvider>) -> Self {
        Self { provider }
    }

    /// Imports the outcome of a file pick.
    ///
    /// A cancelled pick (`None`) is a benign no-op, not an error: the
    /// caller gets `Ok(None)` and nothing is surfaced to the user.
    ///
    /// # Errors
    ///
    /// As for [`import_from_path`] when a file was actually selected.
    ///
    /// [`import_from_path`]: ImportService::import_from_path
    pub fn import_picked_file(&self, selection: Option<&Path>) -> Result<Option<ImportResult>> {
        match selection {
            None => {
                debug!("file selection cancelled");
                Ok(None)
            },
            Some(path) => self.import_from_path(path).map(Some),
        }
    }

    /// Imports the archive at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the archive is
    /// malformed, no row survived decoding, or the provider rejects the
    /// bulk write.
    pub fn import_from_path(&self, path: &Path) -> Result<ImportResult> {
        let file = std::fs::File::open(path).map_err(|e| Error::OperationFailed {
            operation: "open_archive".to_string(),
            cause: e.to_string(),
        })?;
        self.import_from_reader(std::io::BufReader::new(file))
    }

    /// Imports an archive from a reader.
    ///
    /// # Errors
    ///
    /// As for [`import_from_str`], plus read failures.
    ///
    /// [`import_from_str`]: ImportService::import_from_str
    pub fn import_from_reader<R: BufRead>(&self, mut reader: R) -> Result<ImportResult> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| Error::OperationFailed {
                operation: "read_archive".to_string(),
                cause: e.to_string(),
            })?;
        self.import_from_str(&text)
    }

    /// Decodes the archive text and hands every recovered record to the
    /// provider in a single bulk call.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive is malformed, no row survived
    /// decoding, or the provider rejects the bulk write. Row-level damage
    /// is not an error; it lands in the result's warnings.
    pub fn import_from_str(&self, text: &str) -> Result<ImportResult> {
        let archive = codec::decode(text)?;
        self.provider.import_notifications(&archive.records)?;
        info!(
            imported = archive.records.len(),
            skipped = archive.skipped_rows,
            schema = %archive.schema,
            "import complete"
        );
        Ok(ImportResult::from_archive(archive))
    }
}
