//! Unified error types for kikview.
//!
//! Every core operation either returns its result or fails with exactly one
//! [`KikviewError`] variant:
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`HeaderNotFound`](KikviewError::HeaderNotFound) | No line starts with the sentinel column |
//! | [`ColumnNotFound`](KikviewError::ColumnNotFound) | A required column is missing from the header |
//! | [`Parse`](KikviewError::Parse) | Field-count mismatch, bad timestamp, malformed CSV |
//! | [`Io`](KikviewError::Io) | Read, write or permission failure |
//! | `Json` | Rendering to JSON failed (`json-output` feature) |

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for kikview operations.
///
/// # Example
///
/// ```rust
/// use kikview::error::Result;
///
/// fn count_users() -> Result<usize> {
///     Ok(0)
/// }
/// ```
pub type Result<T> = std::result::Result<T, KikviewError>;

/// The error type for all kikview operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KikviewError {
    /// No line in the export has the sentinel as its first field.
    ///
    /// Usually the file is not a Kik conversation export, or the export
    /// format changed.
    #[error("Header row starting with '{sentinel}' not found{}", describe_path(path.as_deref()))]
    HeaderNotFound {
        /// The sentinel column name that was searched for
        sentinel: String,
        /// The file that was scanned, if known
        path: Option<PathBuf>,
    },

    /// The header was found but lacks a column the operation needs.
    #[error("Column '{column}' not found in header{}", describe_path(path.as_deref()))]
    ColumnNotFound {
        /// The missing column name
        column: String,
        /// The file that was read, if known
        path: Option<PathBuf>,
    },

    /// A row could not be parsed.
    ///
    /// Covers rows whose field count differs from the header, timestamps
    /// that match no known layout, and malformed quoting.
    #[error("Parse error{}{}: {message}", line.map(|l| format!(" at line {l}")).unwrap_or_default(), describe_path(path.as_deref()))]
    Parse {
        /// One-based line number, if known
        line: Option<u64>,
        /// Description of what went wrong
        message: String,
        /// The file that was read, if known
        path: Option<PathBuf>,
    },

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON rendering failed.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe_path(path: Option<&Path>) -> String {
    path.map(|p| format!(" (file: {})", p.display()))
        .unwrap_or_default()
}

impl From<csv::Error> for KikviewError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        match err.into_kind() {
            csv::ErrorKind::Io(e) => KikviewError::Io(e),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => KikviewError::Parse {
                line,
                message: format!("expected {expected_len} fields, found {len}"),
                path: None,
            },
            csv::ErrorKind::Utf8 { err, .. } => KikviewError::Parse {
                line,
                message: format!("invalid UTF-8: {err}"),
                path: None,
            },
            other => KikviewError::Parse {
                line,
                message: format!("{other:?}"),
                path: None,
            },
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl KikviewError {
    /// Creates a header-not-found error.
    pub fn header_not_found(sentinel: impl Into<String>, path: Option<PathBuf>) -> Self {
        KikviewError::HeaderNotFound {
            sentinel: sentinel.into(),
            path,
        }
    }

    /// Creates a column-not-found error.
    pub fn column_not_found(column: impl Into<String>, path: Option<PathBuf>) -> Self {
        KikviewError::ColumnNotFound {
            column: column.into(),
            path,
        }
    }

    /// Creates a parse error.
    pub fn parse(line: Option<u64>, message: impl Into<String>) -> Self {
        KikviewError::Parse {
            line,
            message: message.into(),
            path: None,
        }
    }

    /// Attaches a file path to errors that carry one and don't have one yet.
    #[must_use]
    pub fn with_path(mut self, file: &Path) -> Self {
        match &mut self {
            KikviewError::HeaderNotFound { path, .. }
            | KikviewError::ColumnNotFound { path, .. }
            | KikviewError::Parse { path, .. } => {
                if path.is_none() {
                    *path = Some(file.to_path_buf());
                }
            }
            KikviewError::Io(_) => {}
            #[cfg(feature = "json-output")]
            KikviewError::Json(_) => {}
        }
        self
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, KikviewError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, KikviewError::Parse { .. })
    }

    /// Returns `true` if the sentinel header row was missing.
    pub fn is_header_not_found(&self) -> bool {
        matches!(self, KikviewError::HeaderNotFound { .. })
    }

    /// Returns `true` if a required column was missing.
    pub fn is_column_not_found(&self) -> bool {
        matches!(self, KikviewError::ColumnNotFound { .. })
    }
}
