/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::codec::{iso8601_to_ms, ms_to_iso8601};
use crate::envelope::Envelope;
use crate::error::Result;
use record_guid::RecordId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessType {
    Morning,
    PostWorkout,
    Manual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessScorePayload {
    pub date: i64,
    pub score: i64,
    pub readiness_type: ReadinessType,
    pub emoji: Option<String>,
    pub sleep_quality: Option<i64>,
    pub soreness: Option<i64>,
    pub stress: Option<i64>,
    pub energy: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessScoreLocal {
    pub envelope: Envelope,
    pub payload: ReadinessScorePayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReadinessScoreRemote {
    pub id: RecordId,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub date: String,
    pub score: i64,
    #[serde(rename = "type")]
    pub readiness_type: ReadinessType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soreness: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&ReadinessScoreLocal> for ReadinessScoreRemote {
    fn from(local: &ReadinessScoreLocal) -> Self {
        let p = &local.payload;
        ReadinessScoreRemote {
            id: local.envelope.id.clone(),
            user_id: local.envelope.user_id.clone(),
            created_at: ms_to_iso8601(local.envelope.created_at),
            updated_at: ms_to_iso8601(local.envelope.updated_at),
            date: ms_to_iso8601(p.date),
            score: p.score,
            readiness_type: p.readiness_type,
            emoji: p.emoji.clone(),
            sleep_quality: p.sleep_quality,
            soreness: p.soreness,
            stress: p.stress,
            energy: p.energy,
            notes: p.notes.clone(),
        }
    }
}

impl ReadinessScoreLocal {
    pub fn from_remote(remote: ReadinessScoreRemote) -> Result<Self> {
        Ok(ReadinessScoreLocal {
            envelope: Envelope {
                id: remote.id,
                user_id: remote.user_id,
                created_at: iso8601_to_ms(&remote.created_at)?,
                updated_at: iso8601_to_ms(&remote.updated_at)?,
                synced: true,
            },
            payload: ReadinessScorePayload {
                date: iso8601_to_ms(&remote.date)?,
                score: remote.score,
                readiness_type: remote.readiness_type,
                emoji: remote.emoji,
                sleep_quality: remote.sleep_quality,
                soreness: remote.soreness,
                stress: remote.stress,
                energy: remote.energy,
                notes: remote.notes,
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
        let local = ReadinessScoreLocal {
            envelope: Envelope::new("u1", &SystemClock),
            payload: ReadinessScorePayload {
                date: 1_700_000_000_000,
                score: 82,
                readiness_type: ReadinessType::Morning,
                emoji: Some("\u{1F642}".into()),
                sleep_quality: Some(4),
                soreness: Some(2),
                stress: Some(1),
                energy: Some(4),
                notes: None,
            },
        };
        let remote = ReadinessScoreRemote::from(&local);
        let back = ReadinessScoreLocal::from_remote(remote).unwrap();
        assert_eq!(back.payload, local.payload);
    }
}
