//! Locating the true header row of a raw export.
//!
//! A Kik `conversations.csv` opens with a free-text legend describing the
//! columns before the table itself starts. The header is recognised by its
//! first field, the sentinel column (`msg_id`).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::SchemaConfig;
use crate::core::models::Header;
use crate::error::{KikviewError, Result};

/// Where the header row sits in a raw export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderLocation {
    /// Zero-based line index of the header row.
    pub index: usize,

    /// Fields of the header row.
    pub header: Header,
}

/// Scans `path` for the first line whose first field equals the sentinel.
///
/// # Errors
///
/// [`KikviewError::HeaderNotFound`] if the file ends without a match, or
/// [`KikviewError::Io`] if it can't be read.
///
/// # Example
///
/// ```rust,no_run
/// use kikview::config::SchemaConfig;
/// use kikview::core::header::locate_header;
///
/// let location = locate_header("conversations.csv", &SchemaConfig::default())?;
/// println!("header at line {}: {:?}", location.index, location.header);
/// # Ok::<(), kikview::KikviewError>(())
/// ```
pub fn locate_header(path: impl AsRef<Path>, schema: &SchemaConfig) -> Result<HeaderLocation> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let location = locate_header_in(BufReader::new(file), schema).map_err(|e| e.with_path(path))?;
    debug!(
        path = %path.display(),
        index = location.index,
        columns = location.header.len(),
        "Located header row"
    );
    Ok(location)
}

/// Same as [`locate_header`], reading from any buffered source.
///
/// Lines are split on the delimiter without quote handling; the sentinel
/// never needs quoting. Invalid UTF-8 in legend lines is tolerated.
pub fn locate_header_in<R: BufRead>(mut reader: R, schema: &SchemaConfig) -> Result<HeaderLocation> {
    let delimiter = char::from(schema.delimiter);
    let mut buf = Vec::new();
    let mut index = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Err(KikviewError::header_not_found(&schema.sentinel, None));
        }

        let text = String::from_utf8_lossy(&buf);
        let mut line = trim_line_ending(&text);
        if index == 0 {
            line = line.strip_prefix('\u{feff}').unwrap_or(line);
        }

        let mut fields = line.split(delimiter);
        if fields.next() == Some(schema.sentinel.as_str()) {
            return Ok(HeaderLocation {
                index,
                header: Header::new(line.split(delimiter)),
            });
        }

        trace!(index, "Skipping legend line");
        index += 1;
    }
}

fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
