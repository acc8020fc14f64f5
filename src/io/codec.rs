//! CSV archive codec.
//!
//! Encoding is total: every record becomes one line under the canonical
//! schema. Decoding fails softly per row: damaged rows are skipped with a
//! warning, and only a structurally unusable archive (missing header/data
//! rows, unknown schema, zero surviving records) is an error.

use super::schema::SchemaVersion;
use crate::models::NotificationRecord;
use crate::{Error, Result};
use std::io::Write;
use tracing::warn;

/// The outcome of decoding an archive.
#[derive(Debug, Clone)]
pub struct DecodedArchive {
    /// Records recovered from the archive, in file order.
    pub records: Vec<NotificationRecord>,
    /// The schema revision resolved from the header.
    pub schema: SchemaVersion,
    /// Number of data rows skipped during decoding.
    pub skipped_rows: usize,
    /// Human-readable warnings for skipped rows and header drift.
    pub warnings: Vec<String>,
}

impl DecodedArchive {
    /// Total number of data rows the archive carried.
    #[must_use]
    pub const fn total_rows(&self) -> usize {
        self.records.len() + self.skipped_rows
    }
}

/// Streaming encoder writing records under the canonical schema.
///
/// The header is emitted ahead of the first record; lines are joined by
/// `\n` with no trailing newline.
pub struct CsvArchiveWriter<W: Write> {
    writer: W,
    wrote_header: bool,
}

impl<W: Write> CsvArchiveWriter<W> {
    /// Creates a writer over the given output.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            wrote_header: false,
        }
    }

    /// Writes one record, emitting the header line first if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying write fails.
    pub fn write_record(&mut self, record: &NotificationRecord) -> Result<()> {
        let mut line = String::new();
        if self.wrote_header {
            line.push('\n');
        } else {
            line.push_str(&SchemaVersion::CANONICAL.header_line());
            line.push('\n');
            self.wrote_header = true;
        }
        line.push_str(&encode_row(record));
        self.writer
            .write_all(line.as_bytes())
            .map_err(|e| Error::OperationFailed {
                operation: "write_archive".to_string(),
                cause: e.to_string(),
            })
    }

    /// Flushes the output and consumes the writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::OperationFailed {
            operation: "flush_archive".to_string(),
            cause: e.to_string(),
        })
    }
}

/// Encodes records to a complete archive string under the canonical schema.
#[must_use]
pub fn encode_to_string(records: &[NotificationRecord]) -> String {
    let mut out = SchemaVersion::CANONICAL.header_line();
    for record in records {
        out.push('\n');
        out.push_str(&encode_row(record));
    }
    out
}

/// Decodes an archive, resolving the schema from the header and recovering
/// what it can from the data rows.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the archive has fewer than a header
/// row and one data row, when the header width matches no known schema
/// revision, or when every data row was rejected.
pub fn decode(text: &str) -> Result<DecodedArchive> {
    let rows = tokenize(text);
    if rows.len() < 2 {
        return Err(Error::InvalidInput(
            "archive must contain a header row and at least one data row".to_string(),
        ));
    }

    let header = &rows[0];
    let schema = SchemaVersion::from_field_count(header.len()).ok_or_else(|| {
        Error::InvalidInput(format!(
            "unrecognized archive header with {} columns",
            header.len()
        ))
    })?;

    let mut warnings = Vec::new();
    for (name, expected) in header.iter().zip(schema.fields()) {
        if name != expected {
            warn!(found = %name, %expected, "archive header name drift");
            warnings.push(format!(
                "header names column '{name}' where '{expected}' was expected"
            ));
        }
    }

    let mut records = Vec::new();
    let mut skipped_rows = 0;
    for (index, row) in rows.iter().enumerate().skip(1) {
        match parse_row(row, schema) {
            Ok(record) => records.push(record),
            Err(reason) => {
                skipped_rows += 1;
                warn!(row = index + 1, %reason, "skipped archive row");
                warnings.push(format!("row {}: {reason}", index + 1));
            },
        }
    }

    if records.is_empty() {
        return Err(Error::InvalidInput(
            "no valid records found in archive".to_string(),
        ));
    }

    Ok(DecodedArchive {
        records,
        schema,
        skipped_rows,
        warnings,
    })
}

/// Encodes one record as a canonical-schema row.
///
/// String fields are always quoted with internal quotes doubled; absent
/// optionals become the empty unquoted field; numerics and booleans emit
/// their bare literal form.
fn encode_row(record: &NotificationRecord) -> String {
    let fields: [String; 23] = [
        text_field(&record.id),
        text_field(&record.app_name),
        text_field(&record.package_name),
        opt_field(record.title.as_deref()),
        opt_field(record.text.as_deref()),
        record.timestamp.to_string(),
        opt_field(record.category.as_deref()),
        opt_field(record.style.as_deref()),
        opt_field(record.sub_text.as_deref()),
        opt_field(record.info_text.as_deref()),
        opt_field(record.summary_text.as_deref()),
        opt_field(record.group.as_deref()),
        record.is_group_summary.to_string(),
        opt_field(record.channel_id.as_deref()),
        record.is_ongoing.to_string(),
        record.auto_cancel.to_string(),
        record.is_local_only.to_string(),
        record.priority.to_string(),
        record.number.to_string(),
        opt_field(record.app_icon.as_deref()),
        opt_field(record.small_icon.as_deref()),
        opt_field(record.large_icon.as_deref()),
        opt_field(record.big_picture.as_deref()),
    ];
    fields.join(",")
}

fn text_field(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        quoted.push_str(&value.replace('"', "\"\""));
        quoted.push('"');
        quoted
    }
}

fn opt_field(value: Option<&str>) -> String {
    value.map_or_else(String::new, text_field)
}

/// Splits an archive into rows of fields.
///
/// Quote-aware: a `"` inside a quoted field followed by another `"` emits
/// one literal quote and consumes the pair; a lone `"` toggles the quoted
/// state; `,` outside quotes ends the field and a newline outside quotes
/// ends the row, so quoted fields may carry commas, quotes, and newlines.
/// Blank lines produce no row.
fn tokenize(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut row_dirty = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => {
                    in_quotes = true;
                    row_dirty = true;
                },
                ',' => {
                    row.push(std::mem::take(&mut field));
                    row_dirty = true;
                },
                '\n' => {
                    if row_dirty || !field.is_empty() {
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    row_dirty = false;
                },
                // Bare CR outside quotes is CRLF residue, not content.
                '\r' => {},
                _ => {
                    field.push(c);
                    row_dirty = true;
                },
            }
        }
    }

    if row_dirty || !field.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Maps one tokenized row back to a record under the given schema.
///
/// The timestamp must parse (it is the pagination cursor); other numeric
/// fields fall back to 0. Booleans are `true` only for the literal token.
fn parse_row(
    fields: &[String],
    schema: SchemaVersion,
) -> std::result::Result<NotificationRecord, String> {
    if fields.len() < schema.min_fields() {
        return Err(format!(
            "insufficient fields ({}/{})",
            fields.len(),
            schema.min_fields()
        ));
    }

    let field = |i: usize| fields.get(i).map_or("", String::as_str);
    let optional = |i: usize| {
        let value = field(i);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    };
    let flag = |i: usize| field(i) == "true";
    let int_or_zero = |i: usize| field(i).parse::<i32>().unwrap_or(0);

    let timestamp: i64 = field(5)
        .parse()
        .map_err(|_| format!("invalid timestamp '{}'", field(5)))?;

    let (app_icon, small_icon, large_icon, big_picture) = match schema {
        SchemaVersion::V1 => (None, None, None, None),
        SchemaVersion::V2 => (optional(19), None, None, None),
        SchemaVersion::V3 => (optional(19), optional(20), optional(21), optional(22)),
    };

    Ok(NotificationRecord {
        id: field(0).to_string(),
        app_name: field(1).to_string(),
        package_name: field(2).to_string(),
        title: optional(3),
        text: optional(4),
        timestamp,
        category: optional(6),
        style: optional(7),
        sub_text: optional(8),
        info_text: optional(9),
        summary_text: optional(10),
        group: optional(11),
        is_group_summary: flag(12),
        channel_id: optional(13),
        is_ongoing: flag(14),
        auto_cancel: flag(15),
        is_local_only: flag(16),
        priority: int_or_zero(17),
        number: int_or_zero(18),
        app_icon,
        small_icon,
        large_icon,
        big_picture,
    })
}
