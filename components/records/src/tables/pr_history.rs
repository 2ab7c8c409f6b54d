/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::codec::{iso8601_to_ms, ms_to_iso8601};
use crate::envelope::Envelope;
use crate::error::Result;
use record_guid::RecordId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct PrHistoryPayload {
    pub exercise_id: String,
    pub exercise_name: String,
    pub one_rm: f64,
    pub weight: f64,
    pub reps: i64,
    pub workout_log_id: RecordId,
    pub achieved_at: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrHistoryLocal {
    pub envelope: Envelope,
    pub payload: PrHistoryPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PrHistoryRemote {
    pub id: RecordId,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub exercise_id: String,
    pub exercise_name: String,
    pub one_rm: f64,
    pub weight: f64,
    pub reps: i64,
    pub workout_log_id: RecordId,
    pub achieved_at: String,
}

impl From<&PrHistoryLocal> for PrHistoryRemote {
    fn from(local: &PrHistoryLocal) -> Self {
        let p = &local.payload;
        PrHistoryRemote {
            id: local.envelope.id.clone(),
            user_id: local.envelope.user_id.clone(),
            created_at: ms_to_iso8601(local.envelope.created_at),
            updated_at: ms_to_iso8601(local.envelope.updated_at),
            exercise_id: p.exercise_id.clone(),
            exercise_name: p.exercise_name.clone(),
            one_rm: p.one_rm,
            weight: p.weight,
            reps: p.reps,
            workout_log_id: p.workout_log_id.clone(),
            achieved_at: ms_to_iso8601(p.achieved_at),
        }
    }
}

impl PrHistoryLocal {
    pub fn from_remote(remote: PrHistoryRemote) -> Result<Self> {
        Ok(PrHistoryLocal {
            envelope: Envelope {
                id: remote.id,
                user_id: remote.user_id,
                created_at: iso8601_to_ms(&remote.created_at)?,
                updated_at: iso8601_to_ms(&remote.updated_at)?,
                synced: true,
            },
            payload: PrHistoryPayload {
                exercise_id: remote.exercise_id,
                exercise_name: remote.exercise_name,
                one_rm: remote.one_rm,
                weight: remote.weight,
                reps: remote.reps,
                workout_log_id: remote.workout_log_id,
                achieved_at: iso8601_to_ms(&remote.achieved_at)?,
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
        let local = PrHistoryLocal {
            envelope: Envelope::new("u1", &SystemClock),
            payload: PrHistoryPayload {
                exercise_id: "deadlift".into(),
                exercise_name: "Deadlift".into(),
                one_rm: 180.5,
                weight: 160.0,
                reps: 3,
                workout_log_id: RecordId::from("w1"),
                achieved_at: 1_700_000_000_000,
            },
        };
        let remote = PrHistoryRemote::from(&local);
        let back = PrHistoryLocal::from_remote(remote).unwrap();
        assert_eq!(back.payload, local.payload);
    }
}
