//! Command-line interface definition using clap.
//!
//! - [`Args`] - global flags and the chosen [`Command`]
//! - [`Command`] - one subcommand per pipeline stage

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::export::DEFAULT_GROUP_SIZE;

/// Rebuild per-user chat transcripts from Kik conversation CSV exports.
#[derive(Parser, Debug, Clone)]
#[command(name = "kikview")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    kikview header conversations.csv
    kikview users conversations.csv
    kikview chat conversations.csv alice_x1 --export
    kikview chat output.csv alice_x1 --cleaned --json")]
pub struct Args {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Pipeline stages exposed on the command line.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show where the header row is and its columns
    Header {
        /// Raw export file
        input: PathBuf,
    },

    /// Write a copy of the export without the legend
    Strip {
        /// Raw export file
        input: PathBuf,

        /// Destination (default: output.csv next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the distinct senders
    Users {
        /// Raw export file (or cleaned file with --cleaned)
        input: PathBuf,

        /// Input is already cleaned; don't strip it again
        #[arg(long)]
        cleaned: bool,

        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print one participant's conversation, oldest first
    Chat {
        /// Raw export file (or cleaned file with --cleaned)
        input: PathBuf,

        /// Identity to extract (sender or receiver)
        identity: String,

        /// Input is already cleaned; don't strip it again
        #[arg(long)]
        cleaned: bool,

        /// Also write <identity>.csv next to the cleaned file
        #[arg(short, long)]
        export: bool,

        /// Repeat the header every N entries (0 disables)
        #[arg(short, long, value_name = "N", default_value_t = DEFAULT_GROUP_SIZE)]
        group_size: usize,

        /// Print as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    /// Default tracing filter for the verbosity level.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "kikview=debug",
            _ => "kikview=trace",
        }
    }
}
