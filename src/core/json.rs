//! JSON rendering of transcripts and user lists.
//!
//! Each record becomes an object keyed by column name, in header order:
//!
//! ```json
//! {
//!   "identity": "alice",
//!   "header": ["msg_id", "sender_jid", "receiver_jid", "sent_at"],
//!   "records": [
//!     {"msg_id": "1", "sender_jid": "alice", "receiver_jid": "bob", "sent_at": "2021-01-01 10:00:00"}
//!   ]
//! }
//! ```

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::core::models::{ChatRecord, Header, Transcript};
use crate::error::Result;

#[derive(Serialize)]
struct JsonTranscript<'a> {
    identity: &'a str,
    header: &'a Header,
    records: Vec<JsonRecord<'a>>,
}

struct JsonRecord<'a> {
    header: &'a Header,
    record: &'a ChatRecord,
}

impl Serialize for JsonRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.header.len()))?;
        for (column, value) in self.header.columns().iter().zip(&self.record.fields) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Renders a transcript as pretty-printed JSON.
pub fn to_json(transcript: &Transcript) -> Result<String> {
    let view = JsonTranscript {
        identity: &transcript.identity,
        header: &transcript.header,
        records: transcript
            .records
            .iter()
            .map(|record| JsonRecord {
                header: &transcript.header,
                record,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

/// Renders a user list as a JSON array.
pub fn users_to_json(users: &[String]) -> Result<String> {
    Ok(serde_json::to_string_pretty(users)?)
}
