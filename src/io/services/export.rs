//! Notification export service.
//!
//! Walks the provider page by page and streams the archive to its
//! destination as pages arrive, so the full history never has to sit in
//! memory at once.

use crate::config::VaultConfig;
use crate::io::codec::CsvArchiveWriter;
use crate::models::NotificationFilter;
use crate::provider::{NotificationProvider, PageWalker, ProgressCallback};
use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Default page size for the export walk.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Options for a notification export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Page size for the provider walk.
    pub page_size: usize,
    /// Optional filter forwarded to the provider.
    pub filter: Option<NotificationFilter>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            filter: None,
        }
    }
}

impl ExportOptions {
    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: NotificationFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Result of an export operation.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Number of notifications written.
    pub exported: u64,
    /// Store total reported by the up-front count query.
    pub total_known: Option<u64>,
    /// Output path, when a file was written.
    pub output_path: Option<PathBuf>,
}

impl ExportResult {
    /// Returns whether any notifications were exported.
    #[must_use]
    pub const fn has_exports(&self) -> bool {
        self.exported > 0
    }
}

/// Service for exporting notifications to CSV archives.
pub struct ExportService {
    provider: Arc<dyn NotificationProvider>,
}

impl ExportService {
    /// Creates a new export service.
    #[must_use]
    pub fn new(provider: Arc<dyn NotificationProvider>) -> Self {
        Self { provider }
    }

    /// Exports into the configured export directory under the conventional
    /// `notifications_export_<timestamp>.csv` name.
    ///
    /// # Errors
    ///
    /// Returns an error if no export directory can be resolved, or as for
    /// [`export_to_file`].
    ///
    /// [`export_to_file`]: ExportService::export_to_file
    pub fn export_to_documents(
        &self,
        config: &VaultConfig,
        options: &ExportOptions,
        progress: Option<ProgressCallback>,
    ) -> Result<ExportResult> {
        let dir = config.resolve_export_dir()?;
        let path = dir.join(export_file_name(Utc::now()));
        self.export_to_file(&path, options, progress)
    }

    /// Exports to the given file path.
    ///
    /// An empty store (zero total) is a benign outcome: no file is created
    /// and the result carries no output path. On any error the partially
    /// written file is removed; a partial export is never persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query, a page fetch, or file I/O fails.
    pub fn export_to_file(
        &self,
        path: &Path,
        options: &ExportOptions,
        progress: Option<ProgressCallback>,
    ) -> Result<ExportResult> {
        let total = self.count()?;
        if total == 0 {
            info!("nothing to export");
            return Ok(ExportResult {
                exported: 0,
                total_known: Some(0),
                output_path: None,
            });
        }

        let file = std::fs::File::create(path).map_err(|e| Error::OperationFailed {
            operation: "create_export_file".to_string(),
            cause: e.to_string(),
        })?;
        let writer = std::io::BufWriter::new(file);

        match self.stream_archive(writer, options, progress, total) {
            Ok(mut result) => {
                result.output_path = Some(path.to_path_buf());
                info!(exported = result.exported, path = %path.display(), "export complete");
                Ok(result)
            },
            Err(e) => {
                // Discard the partial file; the error already aborted the walk.
                let _ = std::fs::remove_file(path);
                Err(e)
            },
        }
    }

    /// Exports to an arbitrary writer.
    ///
    /// Nothing is written when the store is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query, a page fetch, or a write fails.
    pub fn export_to_writer<W: Write>(
        &self,
        writer: W,
        options: &ExportOptions,
        progress: Option<ProgressCallback>,
    ) -> Result<ExportResult> {
        let total = self.count()?;
        if total == 0 {
            return Ok(ExportResult {
                exported: 0,
                total_known: Some(0),
                output_path: None,
            });
        }
        self.stream_archive(writer, options, progress, total)
    }

    fn stream_archive<W: Write>(
        &self,
        writer: W,
        options: &ExportOptions,
        progress: Option<ProgressCallback>,
        total: u64,
    ) -> Result<ExportResult> {
        let mut archive = CsvArchiveWriter::new(writer);

        let mut walker = PageWalker::new(self.provider.as_ref(), options.page_size).with_total(total);
        if let Some(filter) = &options.filter {
            walker = walker.with_filter(filter.clone());
        }
        if let Some(progress) = progress {
            walker = walker.with_progress(progress);
        }

        let exported = walker.for_each_page(|page| {
            for record in &page {
                archive.write_record(record)?;
            }
            Ok(())
        })?;
        archive.finish()?;

        Ok(ExportResult {
            exported,
            total_known: Some(total),
            output_path: None,
        })
    }

    fn count(&self) -> Result<u64> {
        self.provider.total_count()
    }
}

/// Returns the conventional export file name for the given moment:
/// `notifications_export_<ISO8601 with ':' and '.' replaced by '-'>.csv`.
#[must_use]
pub fn export_file_name(now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("notifications_export_{stamp}.csv")
}
