/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::codec::{iso8601_to_ms, json_value_to_string, ms_to_iso8601};
use crate::envelope::Envelope;
use crate::error::Result;
use record_guid::RecordId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Coach,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Text,
    Voice,
    System,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessagePayload {
    pub text: String,
    pub sender: Sender,
    pub message_type: MessageType,
    /// Compact JSON string locally, e.g. structured voice-parse metadata.
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageLocal {
    pub envelope: Envelope,
    pub payload: MessagePayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MessageRemote {
    pub id: RecordId,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub text: String,
    pub sender: Sender,
    pub message_type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl From<&MessageLocal> for MessageRemote {
    fn from(local: &MessageLocal) -> Self {
        let p = &local.payload;
        MessageRemote {
            id: local.envelope.id.clone(),
            user_id: local.envelope.user_id.clone(),
            created_at: ms_to_iso8601(local.envelope.created_at),
            updated_at: ms_to_iso8601(local.envelope.updated_at),
            text: p.text.clone(),
            sender: p.sender,
            message_type: p.message_type,
            data: p
                .data
                .as_deref()
                .and_then(|s| serde_json::from_str(s).ok()),
        }
    }
}

impl MessageLocal {
    pub fn from_remote(remote: MessageRemote) -> Result<Self> {
        Ok(MessageLocal {
            envelope: Envelope {
                id: remote.id,
                user_id: remote.user_id,
                created_at: iso8601_to_ms(&remote.created_at)?,
                updated_at: iso8601_to_ms(&remote.updated_at)?,
                synced: true,
            },
            payload: MessagePayload {
                text: remote.text,
                sender: remote.sender,
                message_type: remote.message_type,
                data: remote.data.as_ref().map(json_value_to_string),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    #[test]
    fn encode_decode_round_trip() {
        let local = MessageLocal {
            envelope: Envelope::new("u1", &SystemClock),
            payload: MessagePayload {
                text: "Great set!".into(),
                sender: Sender::Coach,
                message_type: MessageType::Text,
                data: Some(r#"{"confidence":0.9}"#.into()),
            },
        };
        let remote = MessageRemote::from(&local);
        let back = MessageLocal::from_remote(remote).unwrap();
        assert_eq!(back.payload, local.payload);
    }

    #[test]
    fn tolerates_absent_data_field() {
        let local = MessageLocal {
            envelope: Envelope::new("u1", &SystemClock),
            payload: MessagePayload {
                text: "hi".into(),
                sender: Sender::User,
                message_type: MessageType::Text,
                data: None,
            },
        };
        let remote = MessageRemote::from(&local);
        assert!(remote.data.is_none());
    }
}
