//! Core processing logic for kikview.
//!
//! The pipeline, leaves first:
//!
//! - [`header`] - find the header row inside a raw export
//! - [`strip`] - write a cleaned copy starting at the header
//! - [`table`] - load a cleaned copy into memory
//! - [`users`] - list the distinct senders
//! - [`extract`] - rebuild one identity's transcript
//! - [`export`] - write a transcript to `<identity>.csv`
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kikview::config::SchemaConfig;
//! use kikview::core::{extract_chat, export_transcript, list_users, strip_legend};
//!
//! # fn main() -> kikview::Result<()> {
//! let schema = SchemaConfig::default();
//! let cleaned = strip_legend("exports/conversations.csv", &schema)?;
//!
//! for user in list_users(&cleaned, &schema)? {
//!     let transcript = extract_chat(&user, &cleaned, &schema)?;
//!     export_transcript(&transcript, format!("exports/{user}.csv"), 50)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod extract;
pub mod header;
#[cfg(feature = "json-output")]
pub mod json;
pub mod models;
pub mod strip;
pub mod table;
pub mod timestamp;
pub mod users;

// Re-export main types and operations for convenience
pub use export::{export_chat, export_path, export_transcript, read_export, to_csv};
pub use extract::{extract_chat, extract_from_table};
pub use header::{HeaderLocation, locate_header};
pub use models::{ChatRecord, Header, Transcript};
pub use strip::{strip_legend, strip_legend_to};
pub use table::ChatTable;
pub use users::{find_user, list_users};
