//! Edge case tests for kikview
//!
//! Boundary conditions of the export format that the unit tests don't
//! exercise end to end.

use std::fs;

use kikview::core::export::{read_export_from, to_csv};
use kikview::core::table::ChatTable;
use kikview::prelude::*;
use tempfile::tempdir;

fn cleaned_from(raw: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let source = dir.path().join("conversations.csv");
    fs::write(&source, raw).unwrap();
    let cleaned = strip_legend(&source, &SchemaConfig::default()).unwrap();
    (dir, cleaned)
}

// =========================================================================
// Legend and header
// =========================================================================

#[test]
fn test_legend_mentioning_sentinel_mid_line() {
    let raw = "The msg_id column, msg_id, identifies messages\n\
               \"msg_id\",quoted,does not count\n\
               msg_id,sender_jid,receiver_jid,sent_at\n\
               1,alice,bob,2021-01-01\n";
    let location = locate_header_in_str(raw);
    assert_eq!(location.index, 2);
}

fn locate_header_in_str(raw: &str) -> HeaderLocation {
    kikview::core::header::locate_header_in(raw.as_bytes(), &SchemaConfig::default()).unwrap()
}

#[test]
fn test_crlf_export() {
    let raw = "legend\r\nmsg_id,sender_jid,receiver_jid,sent_at\r\n1,alice,bob,2021-01-01\r\n";
    let (_dir, cleaned) = cleaned_from(raw);

    let bytes = fs::read(&cleaned).unwrap();
    assert!(bytes.starts_with(b"msg_id,sender_jid,receiver_jid,sent_at\r\n"));
    assert_eq!(list_users(&cleaned, &SchemaConfig::default()).unwrap(), ["alice"]);
}

#[test]
fn test_header_only_export() {
    let (_dir, cleaned) = cleaned_from("legend\nmsg_id,sender_jid,receiver_jid,sent_at\n");
    let schema = SchemaConfig::default();

    assert!(list_users(&cleaned, &schema).unwrap().is_empty());
    let transcript = extract_chat("alice", &cleaned, &schema).unwrap();
    assert!(transcript.is_empty());
    assert_eq!(transcript.header.len(), 4);
}

#[test]
fn test_legend_with_invalid_utf8() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("conversations.csv");
    let mut raw = b"caf\xe9 legend\n".to_vec();
    raw.extend_from_slice(b"msg_id,sender_jid,receiver_jid,sent_at\n1,alice,bob,2021-01-01\n");
    fs::write(&source, raw).unwrap();

    let cleaned = strip_legend(&source, &SchemaConfig::default()).unwrap();
    assert_eq!(fs::read_to_string(cleaned).unwrap().lines().count(), 2);
}

// =========================================================================
// Field contents
// =========================================================================

#[test]
fn test_multiline_body_survives_pipeline() {
    let raw = "legend\nmsg_id,sender_jid,receiver_jid,sent_at,body\n\
               1,alice,bob,2021-01-01 10:00:00,\"line one\nline two, with comma\"\n\
               2,bob,alice,2021-01-01 09:00:00,plain\n";
    let (_dir, cleaned) = cleaned_from(raw);
    let schema = SchemaConfig::default();

    let transcript = extract_chat("alice", &cleaned, &schema).unwrap();
    assert_eq!(transcript.records[1].get(4), Some("line one\nline two, with comma"));

    let csv = to_csv(&transcript, 50).unwrap();
    let back = read_export_from(csv.as_bytes(), "alice").unwrap();
    assert_eq!(back.records[1].fields, transcript.records[1].fields);
}

#[test]
fn test_unicode_identities() {
    let raw = "legend\nmsg_id,sender_jid,receiver_jid,sent_at\n\
               1,Иван,田中,2021-01-01\n2,田中,Иван,2021-01-02\n3,émile,Иван,2021-01-03\n";
    let (_dir, cleaned) = cleaned_from(raw);
    let schema = SchemaConfig::default();

    let users = list_users(&cleaned, &schema).unwrap();
    assert_eq!(users, ["émile", "Иван", "田中"]);
    assert_eq!(extract_chat("Иван", &cleaned, &schema).unwrap().len(), 3);
}

#[test]
fn test_identity_case_is_significant() {
    let raw = "legend\nmsg_id,sender_jid,receiver_jid,sent_at\n\
               1,Alice,bob,2021-01-01\n2,alice,bob,2021-01-02\n";
    let (_dir, cleaned) = cleaned_from(raw);
    let schema = SchemaConfig::default();

    assert_eq!(list_users(&cleaned, &schema).unwrap(), ["Alice", "alice"]);
    assert_eq!(extract_chat("alice", &cleaned, &schema).unwrap().len(), 1);
}

#[test]
fn test_numeric_looking_identities_not_coerced() {
    let raw = "legend\nmsg_id,sender_jid,receiver_jid,sent_at\n\
               1,00123,bob,2021-01-01\n2,123,bob,2021-01-02\n3,1.50,bob,2021-01-03\n";
    let (_dir, cleaned) = cleaned_from(raw);
    let users = list_users(&cleaned, &SchemaConfig::default()).unwrap();
    assert_eq!(users, ["00123", "1.50", "123"]);
}

// =========================================================================
// Timestamps
// =========================================================================

#[test]
fn test_mixed_timestamp_layouts_sort_together() {
    let raw = "legend\nmsg_id,sender_jid,receiver_jid,sent_at\n\
               late,alice,bob,2021-01-01T12:00:00Z\n\
               epoch,alice,bob,1609495200\n\
               ms,alice,bob,1609488000000\n\
               utc,alice,bob,2021-01-01 11:00:00 UTC\n";
    let (_dir, cleaned) = cleaned_from(raw);

    let transcript = extract_chat("alice", &cleaned, &SchemaConfig::default()).unwrap();
    let ids: Vec<_> = transcript.records.iter().filter_map(|r| r.get(0)).collect();
    // 08:00 (ms), 10:00 (epoch), 11:00 (utc), 12:00 (late)
    assert_eq!(ids, ["ms", "epoch", "utc", "late"]);
}

#[test]
fn test_all_blank_timestamps_keep_file_order() {
    let raw = "legend\nmsg_id,sender_jid,receiver_jid,sent_at\n\
               3,alice,bob,\n1,alice,bob,\n2,alice,bob,\n";
    let (_dir, cleaned) = cleaned_from(raw);

    let transcript = extract_chat("alice", &cleaned, &SchemaConfig::default()).unwrap();
    let ids: Vec<_> = transcript.records.iter().filter_map(|r| r.get(0)).collect();
    assert_eq!(ids, ["3", "1", "2"]);
}

// =========================================================================
// Placeholder behaviour
// =========================================================================

#[test]
fn test_unmatched_rows_are_normalized_too() {
    let data = "msg_id,sender_jid,receiver_jid,sent_at,body\n1,bob,carol,2021-01-01,\n";
    let schema = SchemaConfig::default();
    let mut table = ChatTable::from_reader(data.as_bytes(), &schema).unwrap();
    table.fill_blanks(" ");
    assert_eq!(table.records()[0].get(4), Some(" "));
}

#[test]
fn test_placeholder_identity_matches_blank_receivers() {
    let raw = "legend\nmsg_id,sender_jid,receiver_jid,sent_at\n\
               1,alice,,2021-01-01\n2,alice,bob,2021-01-02\n";
    let (_dir, cleaned) = cleaned_from(raw);

    let transcript = extract_chat(" ", &cleaned, &SchemaConfig::default()).unwrap();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.records[0].get(0), Some("1"));
}
