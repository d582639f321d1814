//! A loaded export, carrying the cleaned-file path between calls.
//!
//! [`Session::open`] strips the legend once; every later call reads the
//! cleaned file it produced. Nothing is global: two sessions on two sources
//! are independent (as long as they don't share a directory and cleaned file
//! name).
//!
//! # Example
//!
//! ```rust,no_run
//! use kikview::Session;
//!
//! # fn main() -> kikview::Result<()> {
//! let session = Session::open("exports/conversations.csv")?;
//! for user in session.users()? {
//!     let path = session.export(&user)?;
//!     println!("{user} -> {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{ExportConfig, SchemaConfig};
use crate::core::export::export_chat;
use crate::core::extract::extract_from_table;
use crate::core::models::Transcript;
use crate::core::strip::{cleaned_path, strip_legend_to};
use crate::core::table::ChatTable;
use crate::core::users::users_in;
use crate::error::Result;

/// Source and cleaned paths of one export, plus the configs to read them.
#[derive(Debug, Clone)]
pub struct Session {
    source: PathBuf,
    cleaned: PathBuf,
    schema: SchemaConfig,
    export: ExportConfig,
}

impl Session {
    /// Strips `source` with default settings.
    pub fn open(source: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(source, SchemaConfig::default(), ExportConfig::default())
    }

    /// Strips `source` into the configured cleaned file next to it.
    pub fn open_with(source: impl AsRef<Path>, schema: SchemaConfig, export: ExportConfig) -> Result<Self> {
        let source = source.as_ref().to_path_buf();
        let cleaned = strip_legend_to(
            &source,
            cleaned_path(&source, &export.cleaned_file_name),
            &schema,
        )?;
        info!(source = %source.display(), cleaned = %cleaned.display(), "Opened export");
        Ok(Self {
            source,
            cleaned,
            schema,
            export,
        })
    }

    /// Uses a file that was already cleaned, without touching it.
    pub fn from_cleaned(cleaned: impl AsRef<Path>, schema: SchemaConfig, export: ExportConfig) -> Self {
        let cleaned = cleaned.as_ref().to_path_buf();
        Self {
            source: cleaned.clone(),
            cleaned,
            schema,
            export,
        }
    }

    /// Path of the raw export.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Path of the cleaned file.
    pub fn cleaned(&self) -> &Path {
        &self.cleaned
    }

    /// Schema used to read the cleaned file.
    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// Export settings.
    pub fn export_config(&self) -> &ExportConfig {
        &self.export
    }

    /// Distinct senders, sorted.
    pub fn users(&self) -> Result<Vec<String>> {
        let table = ChatTable::load(&self.cleaned, &self.schema)?;
        users_in(&table, &self.schema)
    }

    /// Transcript of `identity`.
    pub fn chat(&self, identity: &str) -> Result<Transcript> {
        let table = ChatTable::load(&self.cleaned, &self.schema)?;
        extract_from_table(identity, table, &self.schema, &self.export.placeholder)
    }

    /// Writes the transcript of `identity` next to the cleaned file.
    pub fn export(&self, identity: &str) -> Result<PathBuf> {
        let transcript = self.chat(identity)?;
        self.write_export(&transcript)
    }

    /// Writes an already extracted transcript to `<identity>.csv` next to
    /// the cleaned file.
    pub fn write_export(&self, transcript: &Transcript) -> Result<PathBuf> {
        let dir = self.cleaned.parent().unwrap_or_else(|| Path::new(""));
        export_chat(transcript, dir, &self.export)
    }
}
