//! Configuration types for the export schema and output.
//!
//! - [`SchemaConfig`] - sentinel and column names of the conversation export
//! - [`ExportConfig`] - cleaned file name, placeholder and header re-insertion
//!
//! Defaults match the Kik `conversations.csv` layout, so most callers never
//! touch these.
//!
//! # Example
//!
//! ```rust
//! use kikview::config::{ExportConfig, SchemaConfig};
//!
//! let schema = SchemaConfig::new().with_timestamp_column("sent_at");
//! let export = ExportConfig::new().with_group_size(25);
//!
//! assert_eq!(schema.sentinel, "msg_id");
//! assert_eq!(export.group_size, 25);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::export::DEFAULT_GROUP_SIZE;
use crate::core::extract::PLACEHOLDER;
use crate::core::strip::CLEANED_FILE_NAME;

/// Column names of the tabular part of a conversation export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// First field of the true header row (default: `msg_id`)
    pub sentinel: String,

    /// Column holding the sending identity (default: `sender_jid`)
    pub sender_column: String,

    /// Column holding the receiving identity (default: `receiver_jid`)
    pub receiver_column: String,

    /// Column holding the send time (default: `sent_at`)
    pub timestamp_column: String,

    /// Field delimiter (default: `,`)
    pub delimiter: u8,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            sentinel: "msg_id".to_string(),
            sender_column: "sender_jid".to_string(),
            receiver_column: "receiver_jid".to_string(),
            timestamp_column: "sent_at".to_string(),
            delimiter: b',',
        }
    }
}

impl SchemaConfig {
    /// Creates a configuration for the Kik export layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sentinel column name.
    #[must_use]
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Sets the sender column name.
    #[must_use]
    pub fn with_sender_column(mut self, column: impl Into<String>) -> Self {
        self.sender_column = column.into();
        self
    }

    /// Sets the receiver column name.
    #[must_use]
    pub fn with_receiver_column(mut self, column: impl Into<String>) -> Self {
        self.receiver_column = column.into();
        self
    }

    /// Sets the timestamp column name.
    #[must_use]
    pub fn with_timestamp_column(mut self, column: impl Into<String>) -> Self {
        self.timestamp_column = column.into();
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Settings for the files kikview writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Re-emit the header after this many entries; 0 disables (default: 50)
    pub group_size: usize,

    /// File name of the cleaned CSV, placed next to the source (default: `output.csv`)
    pub cleaned_file_name: String,

    /// Replacement for blank fields (default: a single space)
    pub placeholder: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            group_size: DEFAULT_GROUP_SIZE,
            cleaned_file_name: CLEANED_FILE_NAME.to_string(),
            placeholder: PLACEHOLDER.to_string(),
        }
    }
}

impl ExportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many entries are written between header repeats.
    #[must_use]
    pub fn with_group_size(mut self, size: usize) -> Self {
        self.group_size = size;
        self
    }

    /// Sets the cleaned file name.
    #[must_use]
    pub fn with_cleaned_file_name(mut self, name: impl Into<String>) -> Self {
        self.cleaned_file_name = name.into();
        self
    }

    /// Sets the blank-field placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}
