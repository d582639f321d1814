//! Rebuilding one participant's conversation.
//!
//! Extraction works on the whole table before filtering:
//!
//! 1. parse the timestamp column (blank cells sort first)
//! 2. stable-sort every row by time
//! 3. replace blank fields with the placeholder, in every row
//! 4. keep rows where the identity is sender or receiver
//!
//! Because blanks are filled before matching, an identity equal to the
//! placeholder matches rows with a blank sender or receiver.

use std::path::Path;

use tracing::debug;

use crate::config::SchemaConfig;
use crate::core::models::Transcript;
use crate::core::table::ChatTable;
use crate::error::Result;

/// Placeholder written into blank fields.
pub const PLACEHOLDER: &str = " ";

/// Extracts the transcript of `identity` from a cleaned export.
///
/// The result always carries the header, followed by every row where
/// `identity` is the sender or the receiver, oldest first. Ties keep file
/// order.
///
/// # Errors
///
/// [`ColumnNotFound`](crate::KikviewError::ColumnNotFound) if the sender,
/// receiver or timestamp column is absent;
/// [`Parse`](crate::KikviewError::Parse) on ragged rows or unrecognized
/// timestamps. Nothing partial is ever returned.
///
/// # Example
///
/// ```rust,no_run
/// use kikview::config::SchemaConfig;
/// use kikview::core::extract::extract_chat;
///
/// let transcript = extract_chat("alice_x1", "exports/output.csv", &SchemaConfig::default())?;
/// for row in transcript.rows() {
///     println!("{}", row.join(" | "));
/// }
/// # Ok::<(), kikview::KikviewError>(())
/// ```
pub fn extract_chat(
    identity: &str,
    cleaned: impl AsRef<Path>,
    schema: &SchemaConfig,
) -> Result<Transcript> {
    let table = ChatTable::load(cleaned, schema)?;
    extract_from_table(identity, table, schema, PLACEHOLDER)
}

/// Same as [`extract_chat`], for a table already in memory and a custom
/// placeholder.
pub fn extract_from_table(
    identity: &str,
    mut table: ChatTable,
    schema: &SchemaConfig,
    placeholder: &str,
) -> Result<Transcript> {
    let sender = table.column(&schema.sender_column)?;
    let receiver = table.column(&schema.receiver_column)?;
    let sent_at = table.column(&schema.timestamp_column)?;

    table.parse_timestamps(sent_at)?;
    table.sort_by_timestamp();
    table.fill_blanks(placeholder);

    let total = table.records().len();
    let (header, records) = table.into_parts();

    let mut transcript = Transcript::new(identity, header);
    transcript.records = records
        .into_iter()
        .filter(|r| r.get(sender) == Some(identity) || r.get(receiver) == Some(identity))
        .collect();

    debug!(
        identity,
        matched = transcript.len(),
        total,
        "Extracted transcript"
    );
    Ok(transcript)
}
