//! # kikview CLI
//!
//! Command-line driver for the kikview library.

use std::io::{self, Write};
use std::path::Path;
use std::process;

use clap::Parser as ClapParser;

use kikview::cli::{Args, Command};
use kikview::config::{ExportConfig, SchemaConfig};
use kikview::core::export::write_transcript;
use kikview::core::header::locate_header;
use kikview::core::json::{to_json, users_to_json};
use kikview::core::strip::{strip_legend, strip_legend_to};
use kikview::{KikviewError, Session};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    if let Err(e) = run(args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Initialize tracing on stderr; `RUST_LOG` wins over `-v`.
fn init_logging(args: &Args) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}

fn run(args: Args) -> Result<(), KikviewError> {
    let schema = SchemaConfig::default();

    match args.command {
        Command::Header { input } => {
            let location = locate_header(&input, &schema)?;
            println!("📍 Header at line {} (zero-based)", location.index);
            for (i, column) in location.header.columns().iter().enumerate() {
                println!("   {i:>2}  {column}");
            }
        }

        Command::Strip { input, output } => {
            let cleaned = match output {
                Some(dest) => strip_legend_to(&input, dest, &schema)?,
                None => strip_legend(&input, &schema)?,
            };
            println!("✅ Cleaned file saved to {}", cleaned.display());
        }

        Command::Users {
            input,
            cleaned,
            json,
        } => {
            let session = open_session(&input, cleaned, schema, ExportConfig::default())?;
            let users = session.users()?;
            if json {
                println!("{}", users_to_json(&users)?);
            } else {
                for user in &users {
                    println!("{user}");
                }
            }
        }

        Command::Chat {
            input,
            identity,
            cleaned,
            export,
            group_size,
            json,
        } => {
            let config = ExportConfig::new().with_group_size(group_size);
            let session = open_session(&input, cleaned, schema, config)?;
            let transcript = session.chat(&identity)?;

            if json {
                println!("{}", to_json(&transcript)?);
            } else {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                write_transcript(&transcript, &mut out, group_size)?;
                out.flush()?;
            }

            if export {
                let dest = session.write_export(&transcript)?;
                eprintln!(
                    "💾 {} messages written to {}",
                    transcript.len(),
                    dest.display()
                );
            }
        }
    }

    Ok(())
}

fn open_session(
    input: &Path,
    cleaned: bool,
    schema: SchemaConfig,
    export: ExportConfig,
) -> Result<Session, KikviewError> {
    if cleaned {
        Ok(Session::from_cleaned(input, schema, export))
    } else {
        Session::open_with(input, schema, export)
    }
}
