//! # Kikview
//!
//! Rebuild per-user chat transcripts from Kik `conversations.csv` exports.
//!
//! ## Overview
//!
//! A Kik data export opens with a free-text legend, then switches to a CSV
//! table whose header starts with `msg_id`. Kikview:
//!
//! 1. finds that header and writes a cleaned copy without the legend
//! 2. lists the distinct senders
//! 3. extracts one participant's messages (sent or received), oldest first
//! 4. exports them to `<identity>.csv`, repeating the header for readability
//!
//! Every operation returns plain data ([`Vec<String>`], [`Transcript`]) and
//! leaves rendering to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kikview::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let schema = SchemaConfig::default();
//!     let cleaned = strip_legend("conversations.csv", &schema)?;
//!
//!     let users = list_users(&cleaned, &schema)?;
//!     let transcript = extract_chat(&users[0], &cleaned, &schema)?;
//!     export_transcript(&transcript, "first_user.csv", 50)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! Or keep the cleaned path in a [`Session`]:
//!
//! ```rust,no_run
//! use kikview::Session;
//!
//! let session = Session::open("conversations.csv")?;
//! let transcript = session.chat("alice_x1")?;
//! println!("{} messages", transcript.len());
//! # Ok::<(), kikview::KikviewError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] — the pipeline
//!   - [`core::header`] — [`locate_header`](core::header::locate_header)
//!   - [`core::strip`] — [`strip_legend`](core::strip::strip_legend)
//!   - [`core::users`] — [`list_users`](core::users::list_users)
//!   - [`core::extract`] — [`extract_chat`](core::extract::extract_chat)
//!   - [`core::export`] — [`export_transcript`](core::export::export_transcript), [`read_export`](core::export::read_export)
//! - [`config`] — [`SchemaConfig`](config::SchemaConfig), [`ExportConfig`](config::ExportConfig)
//! - [`session`] — [`Session`]
//! - [`error`] — [`KikviewError`], [`Result`]
//! - [`prelude`] — Convenient re-exports
//!
//! ## Limitations
//!
//! Each call reads its file fully into memory. Stripping two exports into the
//! same cleaned file concurrently is unsupported.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod session;

// Re-export the main types at the crate root for convenience
pub use crate::core::models::Transcript;
pub use crate::error::{KikviewError, Result};
pub use crate::session::Session;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use kikview::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{KikviewError, Result};

    // Configs
    pub use crate::config::{ExportConfig, SchemaConfig};

    // Models
    pub use crate::core::models::{ChatRecord, Header, Transcript};

    // Pipeline
    pub use crate::core::export::{export_chat, export_transcript, read_export};
    pub use crate::core::extract::extract_chat;
    pub use crate::core::header::{HeaderLocation, locate_header};
    pub use crate::core::strip::strip_legend;
    pub use crate::core::users::list_users;

    pub use crate::session::Session;
}
