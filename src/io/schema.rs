//! Versioned CSV archive schema.
//!
//! The field list is the contract between encoder and decoder, and it has
//! grown across archive revisions. Both sides reference this one definition
//! instead of positional literals, and the decoder resolves the version from
//! the header before trusting any column index.

use std::fmt;

/// Every field the newest archive revision carries, in column order.
const FIELDS: [&str; 23] = [
    "id",
    "appName",
    "packageName",
    "title",
    "text",
    "timestamp",
    "category",
    "style",
    "subText",
    "infoText",
    "summaryText",
    "group",
    "isGroupSummary",
    "channelId",
    "isOngoing",
    "autoCancel",
    "isLocalOnly",
    "priority",
    "number",
    "appIcon",
    "smallIcon",
    "largeIcon",
    "bigPicture",
];

/// Archive schema revisions.
///
/// Each revision extends the previous one with trailing columns, so the
/// shared prefix always means the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// 19 fields, through `number`. No image references.
    V1,
    /// 20 fields, adds `appIcon`.
    V2,
    /// 23 fields, adds `smallIcon`, `largeIcon`, `bigPicture`.
    V3,
}

impl SchemaVersion {
    /// The revision new archives are written with.
    pub const CANONICAL: Self = Self::V3;

    /// Returns all known revisions, oldest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::V1, Self::V2, Self::V3]
    }

    /// Returns the field names of this revision, in column order.
    #[must_use]
    pub fn fields(self) -> &'static [&'static str] {
        &FIELDS[..self.field_count()]
    }

    /// Returns the number of columns this revision writes.
    #[must_use]
    pub const fn field_count(self) -> usize {
        match self {
            Self::V1 => 19,
            Self::V2 => 20,
            Self::V3 => 23,
        }
    }

    /// Returns the minimum number of fields a data row must carry to be
    /// accepted. Trailing image columns are optional in V3.
    #[must_use]
    pub const fn min_fields(self) -> usize {
        match self {
            Self::V1 => 19,
            Self::V2 | Self::V3 => 20,
        }
    }

    /// Resolves a revision from a header's column count.
    #[must_use]
    pub const fn from_field_count(count: usize) -> Option<Self> {
        match count {
            19 => Some(Self::V1),
            20 => Some(Self::V2),
            23 => Some(Self::V3),
            _ => None,
        }
    }

    /// Returns the header line of this revision.
    #[must_use]
    pub fn header_line(self) -> String {
        self.fields().join(",")
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
            Self::V3 => write!(f, "v3"),
        }
    }
}
