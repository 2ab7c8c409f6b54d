/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use fitsync_records::tables::readiness_score::{
    ReadinessScoreLocal, ReadinessScorePayload, ReadinessType,
};
use fitsync_records::{Envelope, Table};
use rusqlite::{params, Connection, Row};

use crate::error::Result;
use crate::record::SyncedRecord;

fn readiness_type_to_sql(t: ReadinessType) -> &'static str {
    match t {
        ReadinessType::Morning => "morning",
        ReadinessType::PostWorkout => "post_workout",
        ReadinessType::Manual => "manual",
    }
}

fn readiness_type_from_sql(s: &str) -> rusqlite::Result<ReadinessType> {
    match s {
        "morning" => Ok(ReadinessType::Morning),
        "post_workout" => Ok(ReadinessType::PostWorkout),
        "manual" => Ok(ReadinessType::Manual),
        other => Err(rusqlite::Error::InvalidColumnType(
            0,
            format!("unknown readiness_type {other:?}"),
            rusqlite::types::Type::Text,
        )),
    }
}

impl SyncedRecord for ReadinessScoreLocal {
    const TABLE: Table = Table::ReadinessScores;

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let readiness_type: String = row.get("readiness_type")?;
        Ok(ReadinessScoreLocal {
            envelope: Envelope {
                id: row.get("id")?,
                user_id: row.get("user_id")?,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
                synced: row.get("synced")?,
            },
            payload: ReadinessScorePayload {
                date: row.get("date")?,
                score: row.get("score")?,
                readiness_type: readiness_type_from_sql(&readiness_type)?,
                emoji: row.get("emoji")?,
                sleep_quality: row.get("sleep_quality")?,
                soreness: row.get("soreness")?,
                stress: row.get("stress")?,
                energy: row.get("energy")?,
                notes: row.get("notes")?,
            },
        })
    }

    fn upsert(&self, conn: &Connection) -> Result<()> {
        let p = &self.payload;
        conn.execute(
            "INSERT OR REPLACE INTO readiness_scores
                (id, user_id, created_at, updated_at, synced, date, score, readiness_type,
                 emoji, sleep_quality, soreness, stress, energy, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                self.envelope.id,
                self.envelope.user_id,
                self.envelope.created_at,
                self.envelope.updated_at,
                self.envelope.synced,
                p.date,
                p.score,
                readiness_type_to_sql(p.readiness_type),
                p.emoji,
                p.sleep_quality,
                p.soreness,
                p.stress,
                p.energy,
                p.notes,
            ],
        )?;
        Ok(())
    }
}
