//! Core data models: the header row, chat records and transcripts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{KikviewError, Result};

/// Ordered column names of the tabular part of an export.
///
/// ```
/// use kikview::core::models::Header;
///
/// let header = Header::new(["msg_id", "sender_jid", "receiver_jid", "sent_at"]);
/// assert_eq!(header.position("sent_at"), Some(3));
/// assert!(header.position("body").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Creates a header from column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the header has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Index of the first column with this exact name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like [`position`](Self::position), but a missing column is an error.
    pub fn require(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| KikviewError::column_not_found(name, None))
    }

    /// Returns `true` if `fields` spells out this header exactly.
    pub fn matches<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        self.columns.iter().map(String::as_str).eq(fields)
    }
}

/// One data row of a cleaned export.
///
/// Fields stay opaque strings; only the timestamp column is parsed, and the
/// result is kept alongside the raw text for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Raw field values, in header order.
    pub fields: Vec<String>,

    /// Parsed send time. `None` for blank timestamps, which sort first.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// One-based line in the file the record was read from.
    pub line: u64,
}

impl ChatRecord {
    /// Creates a record with no parsed timestamp.
    pub fn new<I, S>(fields: I, line: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            timestamp: None,
            line,
        }
    }

    /// Builder-style method to set the parsed timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Field at `index`, if the row has one.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// The chronological conversation of one identity.
///
/// Holds the header and the matching records in timestamp order. The header
/// is always present, even when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Identity the transcript was extracted for.
    pub identity: String,

    /// Header row of the source table.
    pub header: Header,

    /// Matching records, oldest first.
    pub records: Vec<ChatRecord>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new(identity: impl Into<String>, header: Header) -> Self {
        Self {
            identity: identity.into(),
            header,
            records: Vec::new(),
        }
    }

    /// Number of records, not counting the header.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records matched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the header followed by every record, as plain field lists.
    ///
    /// This is the shape a display shell renders: row 0 is the header.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.columns()).chain(self.records.iter().map(|r| r.fields.as_slice()))
    }
}
