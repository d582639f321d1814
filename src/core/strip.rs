//! Removing the legend block from a raw export.
//!
//! The cleaned file starts at the header row and carries every later line
//! byte for byte, so quoting and escaping survive untouched.
//!
//! Re-running on the same source overwrites the previous cleaned file.
//! Stripping two sources into the same destination at once is not supported.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::SchemaConfig;
use crate::core::header::locate_header;
use crate::error::Result;

/// Default file name of the cleaned CSV.
pub const CLEANED_FILE_NAME: &str = "output.csv";

/// Path of the cleaned file for `source`: `file_name` in the same directory.
pub fn cleaned_path(source: &Path, file_name: &str) -> PathBuf {
    source
        .parent()
        .map(|dir| dir.join(file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

/// Writes `output.csv` next to `source`, without the legend lines.
///
/// Returns the path of the cleaned file; pass it on to
/// [`list_users`](crate::core::users::list_users) and
/// [`extract_chat`](crate::core::extract::extract_chat).
///
/// # Example
///
/// ```rust,no_run
/// use kikview::config::SchemaConfig;
/// use kikview::core::strip::strip_legend;
///
/// let cleaned = strip_legend("exports/conversations.csv", &SchemaConfig::default())?;
/// assert!(cleaned.ends_with("output.csv"));
/// # Ok::<(), kikview::KikviewError>(())
/// ```
pub fn strip_legend(source: impl AsRef<Path>, schema: &SchemaConfig) -> Result<PathBuf> {
    let source = source.as_ref();
    strip_legend_to(source, cleaned_path(source, CLEANED_FILE_NAME), schema)
}

/// Writes the cleaned copy of `source` to `dest`, overwriting it.
///
/// # Errors
///
/// Propagates [`HeaderNotFound`](crate::KikviewError::HeaderNotFound) from
/// the header scan; [`Io`](crate::KikviewError::Io) on read/write failure,
/// including when `dest` is the source file itself.
pub fn strip_legend_to(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    schema: &SchemaConfig,
) -> Result<PathBuf> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    let location = locate_header(source, schema)?;

    if dest.exists() && fs::canonicalize(dest)? == fs::canonicalize(source)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to overwrite source {}", source.display()),
        )
        .into());
    }

    let mut reader = BufReader::new(File::open(source)?);
    let mut writer = BufWriter::new(File::create(dest)?);

    let mut buf = Vec::new();
    let mut index = 0;
    let mut written = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if index >= location.index {
            writer.write_all(&buf)?;
            written += 1;
        }
        index += 1;
    }
    writer.flush()?;

    debug!(
        source = %source.display(),
        dest = %dest.display(),
        skipped = location.index,
        written,
        "Stripped legend"
    );
    Ok(dest.to_path_buf())
}
