//! Writing transcripts to per-user CSV files.
//!
//! Exports are meant to be read as flat text as much as by spreadsheet
//! tools, so the header is repeated every `group_size` entries after a blank
//! separator line. Entries are counted from 1 with the header as entry 1,
//! and every `group_size`-th entry is followed by a separator and the header,
//! the last one included.
//!
//! ```text
//! msg_id,sender_jid,...      <- entry 1
//! 1,alice,...                <- entry 2
//! ...
//! 49,alice,...               <- entry 50
//!
//! msg_id,sender_jid,...
//! 50,alice,...               <- entry 51
//! ```

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ExportConfig;
use crate::core::models::{ChatRecord, Header, Transcript};
use crate::error::{KikviewError, Result};

/// Default number of entries between header repeats.
pub const DEFAULT_GROUP_SIZE: usize = 50;

/// Path of the export file for `identity`: `<dir>/<identity>.csv`.
///
/// Characters that can't appear in a file name are replaced with `_`.
///
/// ```
/// use kikview::core::export::export_path;
/// use std::path::Path;
///
/// let path = export_path(Path::new("out"), "alice_x1@talk.kik.com");
/// assert_eq!(path, Path::new("out/alice_x1@talk.kik.com.csv"));
/// assert_eq!(export_path(Path::new("out"), "../etc"), Path::new("out/.._etc.csv"));
/// ```
pub fn export_path(dir: &Path, identity: &str) -> PathBuf {
    let name: String = identity
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    dir.join(format!("{name}.csv"))
}

/// Writes `transcript` to `dest`, overwriting it.
///
/// A `group_size` of 0 writes the header once.
pub fn export_transcript(
    transcript: &Transcript,
    dest: impl AsRef<Path>,
    group_size: usize,
) -> Result<()> {
    let dest = dest.as_ref();
    let file = File::create(dest)?;
    write_transcript(transcript, file, group_size)?;
    debug!(
        identity = %transcript.identity,
        dest = %dest.display(),
        records = transcript.len(),
        "Exported transcript"
    );
    Ok(())
}

/// Exports to `<dir>/<identity>.csv` and returns the path written.
pub fn export_chat(transcript: &Transcript, dir: &Path, config: &ExportConfig) -> Result<PathBuf> {
    let dest = export_path(dir, &transcript.identity);
    export_transcript(transcript, &dest, config.group_size)?;
    Ok(dest)
}

/// Writes `transcript` as CSV to any writer.
pub fn write_transcript<W: Write>(
    transcript: &Transcript,
    mut out: W,
    group_size: usize,
) -> Result<()> {
    let mut entries = transcript.rows();
    let mut count = 0usize;

    loop {
        // One csv writer per group; separators go to `out` directly.
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut out);
        if count > 0 {
            writer.write_record(transcript.header.columns())?;
        }

        let mut group_full = false;
        for row in entries.by_ref() {
            writer.write_record(row)?;
            count += 1;
            if group_size > 0 && count % group_size == 0 {
                group_full = true;
                break;
            }
        }
        writer.flush()?;
        drop(writer);

        if !group_full {
            break;
        }
        out.write_all(b"\n")?;
    }

    out.flush()?;
    Ok(())
}

/// Renders `transcript` as a CSV string.
pub fn to_csv(transcript: &Transcript, group_size: usize) -> Result<String> {
    let mut buf = Vec::new();
    write_transcript(transcript, &mut buf, group_size)?;
    String::from_utf8(buf).map_err(|e| KikviewError::parse(None, e.to_string()))
}

/// Reads an export back into a [`Transcript`].
///
/// Separator lines and the header rows that follow them are dropped, so the
/// records come back exactly as they were written. The identity is taken
/// from the file stem. Timestamps are not re-parsed.
pub fn read_export(path: impl AsRef<Path>) -> Result<Transcript> {
    let path = path.as_ref();
    let identity = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = File::open(path)?;
    read_export_from(BufReader::new(file), identity).map_err(|e| e.with_path(path))
}

/// Same as [`read_export`], from any source.
///
/// Only the first row of each group may be a repeated header; a data row
/// that happens to equal the header elsewhere is kept.
pub fn read_export_from<R: Read>(mut reader: R, identity: impl Into<String>) -> Result<Transcript> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut header: Option<Header> = None;
    let mut records = Vec::new();

    for (first_line, group) in split_groups(&data) {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(group);

        for (i, result) in reader.records().enumerate() {
            let record = result.map_err(|e| shift_line(e.into(), first_line))?;
            let line = first_line + record.position().map_or(1, |p| p.line()) - 1;

            let Some(expected) = header.as_ref() else {
                header = Some(Header::new(record.iter()));
                continue;
            };
            if i == 0 && expected.matches(record.iter()) {
                continue;
            }
            if record.len() != expected.len() {
                return Err(KikviewError::parse(
                    Some(line),
                    format!("expected {} fields, found {}", expected.len(), record.len()),
                ));
            }
            records.push(ChatRecord::new(record.iter(), line));
        }
    }

    let header = header.ok_or_else(|| KikviewError::parse(Some(1), "export is empty"))?;
    let mut transcript = Transcript::new(identity, header);
    transcript.records = records;
    Ok(transcript)
}

/// Splits an export at blank lines outside quoted fields.
///
/// Yields each group's bytes with the one-based line it starts on. Blank
/// lines themselves belong to no group.
fn split_groups(data: &[u8]) -> Vec<(u64, &[u8])> {
    let mut groups = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    let mut start_line = 1;
    let mut line = 1;
    let mut line_start = 0;

    for (i, &byte) in data.iter().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' => {
                line += 1;
                if in_quotes {
                    continue;
                }
                if matches!(&data[line_start..i], [] | [b'\r']) {
                    if line_start > start {
                        groups.push((start_line, &data[start..line_start]));
                    }
                    start = i + 1;
                    start_line = line;
                }
                line_start = i + 1;
            }
            _ => {}
        }
    }
    if start < data.len() {
        groups.push((start_line, &data[start..]));
    }
    groups
}

fn shift_line(err: KikviewError, first_line: u64) -> KikviewError {
    match err {
        KikviewError::Parse {
            line: Some(line),
            message,
            path,
        } => KikviewError::Parse {
            line: Some(first_line + line - 1),
            message,
            path,
        },
        other => other,
    }
}
