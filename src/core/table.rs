//! In-memory view of a cleaned export.
//!
//! [`ChatTable`] is a header plus rows of string fields, read with the `csv`
//! crate so standard quoting round-trips. Every row must have as many fields
//! as the header; a short or long row is a parse error, never padded.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::SchemaConfig;
use crate::core::models::{ChatRecord, Header};
use crate::core::timestamp::parse_timestamp;
use crate::error::{KikviewError, Result};

/// Rows of a cleaned export, keyed by the header's column names.
#[derive(Debug, Clone)]
pub struct ChatTable {
    header: Header,
    records: Vec<ChatRecord>,
    path: Option<PathBuf>,
}

impl ChatTable {
    /// Loads a cleaned CSV file.
    pub fn load(path: impl AsRef<Path>, schema: &SchemaConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut table = Self::from_reader(BufReader::new(file), schema).map_err(|e| e.with_path(path))?;
        table.path = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            rows = table.records.len(),
            "Loaded cleaned table"
        );
        Ok(table)
    }

    /// Reads a cleaned CSV from any source. The first record is the header.
    pub fn from_reader<R: Read>(reader: R, schema: &SchemaConfig) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(schema.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let header = Header::new(reader.headers()?.iter());

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            records.push(ChatRecord::new(record.iter(), line));
        }

        Ok(Self {
            header,
            records,
            path: None,
        })
    }

    /// The header row.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Data rows in their current order.
    pub fn records(&self) -> &[ChatRecord] {
        &self.records
    }

    /// Consumes the table, returning header and rows.
    pub fn into_parts(self) -> (Header, Vec<ChatRecord>) {
        (self.header, self.records)
    }

    /// Index of `name`, or [`KikviewError::ColumnNotFound`].
    pub fn column(&self, name: &str) -> Result<usize> {
        self.header
            .require(name)
            .map_err(|e| self.attach_path(e))
    }

    /// Iterates over the values of one column.
    pub fn values(&self, column: usize) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(move |r| r.get(column))
    }

    /// Parses column `column` of every row as a timestamp.
    ///
    /// Blank cells leave the timestamp unset. Anything else that fails to
    /// parse is a [`KikviewError::Parse`] naming the line, and no row is
    /// modified.
    pub fn parse_timestamps(&mut self, column: usize) -> Result<()> {
        let mut parsed = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let raw = record.get(column).unwrap_or_default();
            if raw.trim().is_empty() {
                parsed.push(None);
                continue;
            }
            match parse_timestamp(raw) {
                Some(ts) => parsed.push(Some(ts)),
                None => {
                    let err = KikviewError::parse(
                        Some(record.line),
                        format!("unrecognized timestamp '{raw}'"),
                    );
                    return Err(self.attach_path(err));
                }
            }
        }

        for (record, ts) in self.records.iter_mut().zip(parsed) {
            record.timestamp = ts;
        }
        Ok(())
    }

    /// Sorts rows by parsed timestamp, oldest first.
    ///
    /// The sort is stable: equal timestamps keep file order, and rows without
    /// a timestamp come first.
    pub fn sort_by_timestamp(&mut self) {
        self.records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    }

    /// Replaces every empty field in every row with `placeholder`.
    pub fn fill_blanks(&mut self, placeholder: &str) {
        for field in self.records.iter_mut().flat_map(|r| r.fields.iter_mut()) {
            if field.is_empty() {
                placeholder.clone_into(field);
            }
        }
    }

    fn attach_path(&self, err: KikviewError) -> KikviewError {
        match &self.path {
            Some(path) => err.with_path(path),
            None => err,
        }
    }
}
