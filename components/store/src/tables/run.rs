/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use fitsync_records::tables::run::{RunLocal, RunPayload, TerrainDifficulty, WorkoutType};
use fitsync_records::{Envelope, Table};
use rusqlite::{params, Connection, Row};

use crate::error::Result;
use crate::record::SyncedRecord;

fn terrain_to_sql(t: TerrainDifficulty) -> &'static str {
    match t {
        TerrainDifficulty::Flat => "flat",
        TerrainDifficulty::Rolling => "rolling",
        TerrainDifficulty::Hilly => "hilly",
        TerrainDifficulty::Mountainous => "mountainous",
    }
}

fn terrain_from_sql(s: &str) -> rusqlite::Result<TerrainDifficulty> {
    match s {
        "flat" => Ok(TerrainDifficulty::Flat),
        "rolling" => Ok(TerrainDifficulty::Rolling),
        "hilly" => Ok(TerrainDifficulty::Hilly),
        "mountainous" => Ok(TerrainDifficulty::Mountainous),
        other => Err(rusqlite::Error::InvalidColumnType(
            0,
            format!("unknown terrain_difficulty {other:?}"),
            rusqlite::types::Type::Text,
        )),
    }
}

fn workout_type_to_sql(t: WorkoutType) -> &'static str {
    match t {
        WorkoutType::Outdoor => "outdoor",
        WorkoutType::Treadmill => "treadmill",
        WorkoutType::Trail => "trail",
        WorkoutType::Track => "track",
    }
}

fn workout_type_from_sql(s: &str) -> rusqlite::Result<WorkoutType> {
    match s {
        "outdoor" => Ok(WorkoutType::Outdoor),
        "treadmill" => Ok(WorkoutType::Treadmill),
        "trail" => Ok(WorkoutType::Trail),
        "track" => Ok(WorkoutType::Track),
        other => Err(rusqlite::Error::InvalidColumnType(
            0,
            format!("unknown workout_type {other:?}"),
            rusqlite::types::Type::Text,
        )),
    }
}

impl SyncedRecord for RunLocal {
    const TABLE: Table = Table::Runs;

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let terrain_difficulty: String = row.get("terrain_difficulty")?;
        let workout_type: Option<String> = row.get("workout_type")?;
        Ok(RunLocal {
            envelope: Envelope {
                id: row.get("id")?,
                user_id: row.get("user_id")?,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
                synced: row.get("synced")?,
            },
            payload: RunPayload {
                start_time: row.get("start_time")?,
                end_time: row.get("end_time")?,
                distance: row.get("distance")?,
                duration: row.get("duration")?,
                pace: row.get("pace")?,
                avg_speed: row.get("avg_speed")?,
                calories: row.get("calories")?,
                elevation_gain: row.get("elevation_gain")?,
                elevation_loss: row.get("elevation_loss")?,
                grade_adjusted_pace: row.get("grade_adjusted_pace")?,
                grade_percent: row.get("grade_percent")?,
                terrain_difficulty: terrain_from_sql(&terrain_difficulty)?,
                route: row.get("route")?,
                workout_type: workout_type.as_deref().map(workout_type_from_sql).transpose()?,
                workout_name: row.get("workout_name")?,
            },
        })
    }

    fn upsert(&self, conn: &Connection) -> Result<()> {
        let p = &self.payload;
        conn.execute(
            "INSERT OR REPLACE INTO runs
                (id, user_id, created_at, updated_at, synced, start_time, end_time, distance,
                 duration, pace, avg_speed, calories, elevation_gain, elevation_loss,
                 grade_adjusted_pace, grade_percent, terrain_difficulty, route, workout_type,
                 workout_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                     ?18, ?19, ?20)",
            params![
                self.envelope.id,
                self.envelope.user_id,
                self.envelope.created_at,
                self.envelope.updated_at,
                self.envelope.synced,
                p.start_time,
                p.end_time,
                p.distance,
                p.duration,
                p.pace,
                p.avg_speed,
                p.calories,
                p.elevation_gain,
                p.elevation_loss,
                p.grade_adjusted_pace,
                p.grade_percent,
                terrain_to_sql(p.terrain_difficulty),
                p.route,
                p.workout_type.map(workout_type_to_sql),
                p.workout_name,
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
        store.create(&local).unwrap();
        let back: RunLocal = store.get(&local.envelope.id).unwrap().unwrap();
        assert_eq!(back.payload, local.payload);
    }
}
