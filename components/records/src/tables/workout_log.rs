/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::codec::{iso8601_to_ms, ms_to_iso8601};
use crate::envelope::Envelope;
use crate::error::Result;
use record_guid::RecordId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLogPayload {
    pub workout_name: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLogLocal {
    pub envelope: Envelope,
    pub payload: WorkoutLogPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkoutLogRemote {
    pub id: RecordId,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub workout_name: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl From<&WorkoutLogLocal> for WorkoutLogRemote {
    fn from(local: &WorkoutLogLocal) -> Self {
        WorkoutLogRemote {
            id: local.envelope.id.clone(),
            user_id: local.envelope.user_id.clone(),
            created_at: ms_to_iso8601(local.envelope.created_at),
            updated_at: ms_to_iso8601(local.envelope.updated_at),
            workout_name: local.payload.workout_name.clone(),
            start_time: ms_to_iso8601(local.payload.start_time),
            end_time: local.payload.end_time.map(ms_to_iso8601),
        }
    }
}

impl WorkoutLogLocal {
    /// Decode a remote row, marking it synced as a just-downloaded row must be.
    pub fn from_remote(remote: WorkoutLogRemote) -> Result<Self> {
        Ok(WorkoutLogLocal {
            envelope: Envelope {
                id: remote.id,
                user_id: remote.user_id,
                created_at: iso8601_to_ms(&remote.created_at)?,
                updated_at: iso8601_to_ms(&remote.updated_at)?,
                synced: true,
            },
            payload: WorkoutLogPayload {
                workout_name: remote.workout_name,
                start_time: iso8601_to_ms(&remote.start_time)?,
                end_time: remote.end_time.map(|s| iso8601_to_ms(&s)).transpose()?,
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
        let clock = SystemClock;
        let mut envelope = Envelope::new("u1", &clock);
        envelope.created_at = 1_700_000_000_000;
        envelope.updated_at = 1_700_000_000_000;
        let local = WorkoutLogLocal {
            envelope,
            payload: WorkoutLogPayload {
                workout_name: "Push Day".into(),
                start_time: 1_700_000_000_000,
                end_time: Some(1_700_000_900_000),
            },
        };
        let remote = WorkoutLogRemote::from(&local);
        let back = WorkoutLogLocal::from_remote(remote).unwrap();
        assert_eq!(back.payload.workout_name, "Push Day");
        assert_eq!(back.payload.start_time, 1_700_000_000_000);
        assert_eq!(back.payload.end_time, Some(1_700_000_900_000));
        assert!(back.envelope.synced);
    }
}
