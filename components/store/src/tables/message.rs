/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use fitsync_records::tables::message::{MessageLocal, MessagePayload, MessageType, Sender};
use fitsync_records::{Envelope, Table};
use rusqlite::{params, Connection, Row};

use crate::error::Result;
use crate::record::SyncedRecord;

fn sender_to_sql(s: Sender) -> &'static str {
    match s {
        Sender::User => "user",
        Sender::Coach => "coach",
        Sender::System => "system",
    }
}

fn sender_from_sql(s: &str) -> rusqlite::Result<Sender> {
    match s {
        "user" => Ok(Sender::User),
        "coach" => Ok(Sender::Coach),
        "system" => Ok(Sender::System),
        other => Err(rusqlite::Error::InvalidColumnType(
            0,
            format!("unknown sender {other:?}"),
            rusqlite::types::Type::Text,
        )),
    }
}

fn message_type_to_sql(t: MessageType) -> &'static str {
    match t {
        MessageType::Text => "text",
        MessageType::Voice => "voice",
        MessageType::System => "system",
    }
}

fn message_type_from_sql(s: &str) -> rusqlite::Result<MessageType> {
    match s {
        "text" => Ok(MessageType::Text),
        "voice" => Ok(MessageType::Voice),
        "system" => Ok(MessageType::System),
        other => Err(rusqlite::Error::InvalidColumnType(
            0,
            format!("unknown message_type {other:?}"),
            rusqlite::types::Type::Text,
        )),
    }
}

impl SyncedRecord for MessageLocal {
    const TABLE: Table = Table::Messages;

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let sender: String = row.get("sender")?;
        let message_type: String = row.get("message_type")?;
        Ok(MessageLocal {
            envelope: Envelope {
                id: row.get("id")?,
                user_id: row.get("user_id")?,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
                synced: row.get("synced")?,
            },
            payload: MessagePayload {
                text: row.get("text")?,
                sender: sender_from_sql(&sender)?,
                message_type: message_type_from_sql(&message_type)?,
                data: row.get("data")?,
            },
        })
    }

    fn upsert(&self, conn: &Connection) -> Result<()> {
        let p = &self.payload;
        conn.execute(
            "INSERT OR REPLACE INTO messages
                (id, user_id, created_at, updated_at, synced, text, sender, message_type, data)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                self.envelope.id,
                self.envelope.user_id,
                self.envelope.created_at,
                self.envelope.updated_at,
                self.envelope.synced,
                p.text,
                sender_to_sql(p.sender),
                message_type_to_sql(p.message_type),
                p.data,
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_store::LocalStore;
    use crate::schema::FitsyncConnectionInitializer;
    use fitsync_records::SystemClock;

    #[test]
    fn round_trips_through_storage() {
        let store = LocalStore::open_in_memory(&FitsyncConnectionInitializer).unwrap();
        let local = MessageLocal {
            envelope: Envelope::new("u1", &SystemClock),
            payload: MessagePayload {
                text: "Great set!".into(),
                sender: Sender::Coach,
                message_type: MessageType::Text,
                data: Some(r#"{"confidence":0.9}"#.into()),
            },
        };
        store.create(&local).unwrap();
        let back: MessageLocal = store.get(&local.envelope.id).unwrap().unwrap();
        assert_eq!(back.payload, local.payload);
    }
}
