//! Property-based tests for kikview.
//!
//! These tests generate random exports to find edge cases.

use proptest::prelude::*;

use kikview::config::SchemaConfig;
use kikview::core::export::{read_export_from, to_csv};
use kikview::core::extract::{PLACEHOLDER, extract_from_table};
use kikview::core::header::locate_header_in;
use kikview::core::table::ChatTable;
use kikview::core::users::users_in;

const HEADER: &str = "msg_id,sender_jid,receiver_jid,sent_at,body";

/// Identities from a fixed pool (fast, no regex)
fn arb_identity() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "alice".to_string(),
        "Alice".to_string(),
        "bob".to_string(),
        "carol_x@talk.kik.com".to_string(),
        "007".to_string(),
        "Иван".to_string(),
        String::new(),
    ])
}

fn arb_body() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "hello".to_string(),
        String::new(),
        "with, comma".to_string(),
        "with \"quotes\"".to_string(),
        "two\nlines".to_string(),
        "🎉 emoji".to_string(),
    ])
}

/// (sender, receiver, timestamp offset or blank, body)
fn arb_row() -> impl Strategy<Value = (String, String, Option<u32>, String)> {
    (
        arb_identity(),
        arb_identity(),
        prop::option::of(0u32..20),
        arb_body(),
    )
}

fn arb_legend() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "Kik export".to_string(),
            String::new(),
            "msg_id is the message id".to_string(),
            "sender_jid,receiver_jid".to_string(),
            " msg_id,padded".to_string(),
        ]),
        0..6,
    )
}

fn render(rows: &[(String, String, Option<u32>, String)]) -> String {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(HEADER.split(',')).unwrap();
    for (i, (from, to, offset, body)) in rows.iter().enumerate() {
        let id = i.to_string();
        let ts = offset
            .map(|o| format!("2021-01-01 10:{o:02}:00"))
            .unwrap_or_default();
        writer
            .write_record([id.as_str(), from.as_str(), to.as_str(), ts.as_str(), body.as_str()])
            .unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

fn table(rows: &[(String, String, Option<u32>, String)]) -> ChatTable {
    ChatTable::from_reader(render(rows).as_bytes(), &SchemaConfig::default()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // HEADER PROPERTIES
    // ============================================

    /// The header is found right after any legend
    #[test]
    fn header_index_equals_legend_length(legend in arb_legend(), rows in prop::collection::vec(arb_row(), 0..5)) {
        let mut raw = legend.join("\n");
        if !legend.is_empty() {
            raw.push('\n');
        }
        raw.push_str(&render(&rows));

        let location = locate_header_in(raw.as_bytes(), &SchemaConfig::default()).unwrap();
        prop_assert_eq!(location.index, legend.len());
        prop_assert!(location.header.matches(HEADER.split(',')));
    }

    // ============================================
    // USER PROPERTIES
    // ============================================

    /// User lists are strictly ascending (sorted, no duplicates)
    #[test]
    fn users_sorted_and_unique(rows in prop::collection::vec(arb_row(), 0..30)) {
        let schema = SchemaConfig::default();
        let users = users_in(&table(&rows), &schema).unwrap();
        prop_assert!(users.windows(2).all(|w| w[0] < w[1]));
    }

    /// Every non-blank sender is listed
    #[test]
    fn users_cover_all_senders(rows in prop::collection::vec(arb_row(), 0..30)) {
        let schema = SchemaConfig::default();
        let users = users_in(&table(&rows), &schema).unwrap();
        for (from, _, _, _) in &rows {
            prop_assert_eq!(users.contains(from), !from.is_empty());
        }
    }

    // ============================================
    // EXTRACT PROPERTIES
    // ============================================

    /// Only rows involving the identity, in non-decreasing time
    #[test]
    fn extract_filters_and_orders(rows in prop::collection::vec(arb_row(), 0..30), identity in arb_identity()) {
        prop_assume!(!identity.is_empty());
        let schema = SchemaConfig::default();
        let transcript = extract_from_table(&identity, table(&rows), &schema, PLACEHOLDER).unwrap();

        for record in &transcript.records {
            prop_assert!(record.get(1) == Some(identity.as_str()) || record.get(2) == Some(identity.as_str()));
        }
        prop_assert!(transcript.records.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        let expected = rows.iter().filter(|(f, t, _, _)| *f == identity || *t == identity).count();
        prop_assert_eq!(transcript.len(), expected);
    }

    /// Ties keep source order
    #[test]
    fn extract_is_stable(rows in prop::collection::vec(arb_row(), 0..30)) {
        let schema = SchemaConfig::default();
        let transcript = extract_from_table("alice", table(&rows), &schema, PLACEHOLDER).unwrap();
        for w in transcript.records.windows(2) {
            if w[0].timestamp == w[1].timestamp {
                prop_assert!(w[0].line < w[1].line);
            }
        }
    }

    /// Same input, same output
    #[test]
    fn extract_is_idempotent(rows in prop::collection::vec(arb_row(), 0..30)) {
        let schema = SchemaConfig::default();
        let a = extract_from_table("bob", table(&rows), &schema, PLACEHOLDER).unwrap();
        let b = extract_from_table("bob", table(&rows), &schema, PLACEHOLDER).unwrap();
        prop_assert_eq!(a, b);
    }

    /// No blank field survives extraction
    #[test]
    fn extract_leaves_no_blanks(rows in prop::collection::vec(arb_row(), 0..30)) {
        let schema = SchemaConfig::default();
        let transcript = extract_from_table("alice", table(&rows), &schema, PLACEHOLDER).unwrap();
        prop_assert!(transcript.records.iter().flat_map(|r| &r.fields).all(|f| !f.is_empty()));
    }

    // ============================================
    // EXPORT PROPERTIES
    // ============================================

    /// Exported records read back unchanged, for any group size
    #[test]
    fn export_round_trip(rows in prop::collection::vec(arb_row(), 0..40), group_size in 0usize..8) {
        let schema = SchemaConfig::default();
        let transcript = extract_from_table("alice", table(&rows), &schema, PLACEHOLDER).unwrap();

        let csv = to_csv(&transcript, group_size).unwrap();
        let back = read_export_from(csv.as_bytes(), "alice").unwrap();

        prop_assert_eq!(&back.header, &transcript.header);
        let written: Vec<_> = back.records.iter().map(|r| &r.fields).collect();
        let original: Vec<_> = transcript.records.iter().map(|r| &r.fields).collect();
        prop_assert_eq!(written, original);
    }
}
