//! Discovering the participants of an export.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use crate::config::SchemaConfig;
use crate::core::table::ChatTable;
use crate::error::Result;

/// Lists every distinct sender in a cleaned export, sorted ascending.
///
/// Identities are compared as raw strings: no case folding, no trimming,
/// no numeric coercion. Blank sender cells name nobody and are skipped.
///
/// # Errors
///
/// [`ColumnNotFound`](crate::KikviewError::ColumnNotFound) if the sender
/// column is absent; [`Parse`](crate::KikviewError::Parse) on rows with the
/// wrong field count.
///
/// # Example
///
/// ```rust,no_run
/// use kikview::config::SchemaConfig;
/// use kikview::core::users::list_users;
///
/// for user in list_users("exports/output.csv", &SchemaConfig::default())? {
///     println!("{user}");
/// }
/// # Ok::<(), kikview::KikviewError>(())
/// ```
pub fn list_users(cleaned: impl AsRef<Path>, schema: &SchemaConfig) -> Result<Vec<String>> {
    let table = ChatTable::load(cleaned, schema)?;
    users_in(&table, schema)
}

/// Same as [`list_users`], for a table already in memory.
pub fn users_in(table: &ChatTable, schema: &SchemaConfig) -> Result<Vec<String>> {
    let sender = table.column(&schema.sender_column)?;

    let users: BTreeSet<&str> = table.values(sender).filter(|v| !v.is_empty()).collect();
    debug!(count = users.len(), "Collected identities");

    Ok(users.into_iter().map(str::to_owned).collect())
}

/// Looks `name` up in a user list.
///
/// ```
/// use kikview::core::users::find_user;
///
/// let users = vec!["alice".to_string(), "bob".to_string()];
/// assert_eq!(find_user(&users, "bob"), Some("bob"));
/// assert_eq!(find_user(&users, "Bob"), None);
/// ```
pub fn find_user<'a>(users: &'a [String], name: &str) -> Option<&'a str> {
    users.iter().map(String::as_str).find(|u| *u == name)
}
