/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::codec::{iso8601_to_ms, json_string_to_value, json_value_to_string, ms_to_iso8601};
use crate::envelope::Envelope;
use crate::error::Result;
use record_guid::RecordId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainDifficulty {
    Flat,
    Rolling,
    Hilly,
    Mountainous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Outdoor,
    Treadmill,
    Trail,
    Track,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunPayload {
    pub start_time: i64,
    pub end_time: i64,
    pub distance: f64,
    pub duration: f64,
    pub pace: f64,
    pub avg_speed: f64,
    pub calories: f64,
    pub elevation_gain: f64,
    pub elevation_loss: f64,
    pub grade_adjusted_pace: Option<f64>,
    pub grade_percent: f64,
    pub terrain_difficulty: TerrainDifficulty,
    /// Compact JSON string locally; a JSON object on the wire.
    pub route: String,
    pub workout_type: Option<WorkoutType>,
    pub workout_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunLocal {
    pub envelope: Envelope,
    pub payload: RunPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunRemote {
    pub id: RecordId,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub start_time: String,
    pub end_time: String,
    pub distance: f64,
    pub duration: f64,
    pub pace: f64,
    pub avg_speed: f64,
    pub calories: f64,
    pub elevation_gain: f64,
    pub elevation_loss: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_adjusted_pace: Option<f64>,
    pub grade_percent: f64,
    pub terrain_difficulty: TerrainDifficulty,
    pub route: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<WorkoutType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_name: Option<String>,
}

impl From<&RunLocal> for RunRemote {
    fn from(local: &RunLocal) -> Self {
        let p = &local.payload;
        RunRemote {
            id: local.envelope.id.clone(),
            user_id: local.envelope.user_id.clone(),
            created_at: ms_to_iso8601(local.envelope.created_at),
            updated_at: ms_to_iso8601(local.envelope.updated_at),
            start_time: ms_to_iso8601(p.start_time),
            end_time: ms_to_iso8601(p.end_time),
            distance: p.distance,
            duration: p.duration,
            pace: p.pace,
            avg_speed: p.avg_speed,
            calories: p.calories,
            elevation_gain: p.elevation_gain,
            elevation_loss: p.elevation_loss,
            grade_adjusted_pace: p.grade_adjusted_pace,
            grade_percent: p.grade_percent,
            terrain_difficulty: p.terrain_difficulty,
            // `route` has no schema of its own; encode is infallible here, any
            // parse error was already caught when the row was first created locally.
            route: serde_json::from_str(&p.route).unwrap_or(serde_json::Value::Null),
            workout_type: p.workout_type,
            workout_name: p.workout_name.clone(),
        }
    }
}

impl RunLocal {
    pub fn from_remote(remote: RunRemote) -> Result<Self> {
        Ok(RunLocal {
            envelope: Envelope {
                id: remote.id,
                user_id: remote.user_id,
                created_at: iso8601_to_ms(&remote.created_at)?,
                updated_at: iso8601_to_ms(&remote.updated_at)?,
                synced: true,
            },
            payload: RunPayload {
                start_time: iso8601_to_ms(&remote.start_time)?,
                end_time: iso8601_to_ms(&remote.end_time)?,
                distance: remote.distance,
                duration: remote.duration,
                pace: remote.pace,
                avg_speed: remote.avg_speed,
                calories: remote.calories,
                elevation_gain: remote.elevation_gain,
                elevation_loss: remote.elevation_loss,
                grade_adjusted_pace: remote.grade_adjusted_pace,
                grade_percent: remote.grade_percent,
                terrain_difficulty: remote.terrain_difficulty,
                route: json_value_to_string(&remote.route),
                workout_type: remote.workout_type,
                workout_name: remote.workout_name,
            },
        })
    }
}

/// Parse the locally-stored `route` string, surfacing a codec error instead
/// of silently dropping it, for callers (e.g. the uploader) that want to
/// fail a single poison row rather than send `null`.
pub fn validate_route_json(route: &str) -> Result<()> {
    json_string_to_value("route", route).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    #[test]
    fn encode_decode_round_trip() {
        let local = RunLocal {
            envelope: Envelope::new("u1", &SystemClock),
            payload: RunPayload {
                start_time: 1_700_000_000_000,
                end_time: 1_700_001_800_000,
                distance: 5000.0,
                duration: 1800.0,
                pace: 6.0,
                avg_speed: 2.77,
                calories: 350.0,
                elevation_gain: 40.0,
                elevation_loss: 38.0,
                grade_adjusted_pace: Some(5.8),
                grade_percent: 1.2,
                terrain_difficulty: TerrainDifficulty::Hilly,
                route: r#"{"points":[[1.0,2.0]]}"#.into(),
                workout_type: Some(WorkoutType::Outdoor),
                workout_name: Some("Sunday long run".into()),
            },
        };
        let remote = RunRemote::from(&local);
        let back = RunLocal::from_remote(remote).unwrap();
        assert_eq!(back.payload, local.payload);
        assert!(back.envelope.synced);
    }

    #[test]
    fn rejects_invalid_route_json() {
        assert!(validate_route_json("not json").is_err());
        assert!(validate_route_json("{}").is_ok());
    }
}
