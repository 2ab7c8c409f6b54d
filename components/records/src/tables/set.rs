/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::codec::{iso8601_to_ms, ms_to_iso8601};
use crate::envelope::Envelope;
use crate::error::Result;
use record_guid::RecordId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct SetPayload {
    pub workout_log_id: RecordId,
    pub exercise_id: String,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: i64,
    pub rpe: Option<f64>,
    pub voice_command_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetLocal {
    pub envelope: Envelope,
    pub payload: SetPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SetRemote {
    pub id: RecordId,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub workout_log_id: RecordId,
    pub exercise_id: String,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpe: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_command_id: Option<String>,
}

impl From<&SetLocal> for SetRemote {
    fn from(local: &SetLocal) -> Self {
        SetRemote {
            id: local.envelope.id.clone(),
            user_id: local.envelope.user_id.clone(),
            created_at: ms_to_iso8601(local.envelope.created_at),
            updated_at: ms_to_iso8601(local.envelope.updated_at),
            workout_log_id: local.payload.workout_log_id.clone(),
            exercise_id: local.payload.exercise_id.clone(),
            exercise_name: local.payload.exercise_name.clone(),
            weight: local.payload.weight,
            reps: local.payload.reps,
            rpe: local.payload.rpe,
            voice_command_id: local.payload.voice_command_id.clone(),
        }
    }
}

impl SetLocal {
    pub fn from_remote(remote: SetRemote) -> Result<Self> {
        Ok(SetLocal {
            envelope: Envelope {
                id: remote.id,
                user_id: remote.user_id,
                created_at: iso8601_to_ms(&remote.created_at)?,
                updated_at: iso8601_to_ms(&remote.updated_at)?,
                synced: true,
            },
            payload: SetPayload {
                workout_log_id: remote.workout_log_id,
                exercise_id: remote.exercise_id,
                exercise_name: remote.exercise_name,
                weight: remote.weight,
                reps: remote.reps,
                rpe: remote.rpe,
                voice_command_id: remote.voice_command_id,
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
        let local = SetLocal {
            envelope: Envelope::new("u1", &SystemClock),
            payload: SetPayload {
                workout_log_id: RecordId::from("w1"),
                exercise_id: "bench-press".into(),
                exercise_name: "Bench Press".into(),
                weight: 100.0,
                reps: 5,
                rpe: Some(8.5),
                voice_command_id: None,
            },
        };
        let remote = SetRemote::from(&local);
        let back = SetLocal::from_remote(remote).unwrap();
        assert_eq!(back.payload, local.payload);
        assert!(back.envelope.synced);
    }
}
