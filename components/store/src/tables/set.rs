/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use fitsync_records::tables::set::{SetLocal, SetPayload};
use fitsync_records::{Envelope, Table};
use rusqlite::{params, Connection, Row};

use crate::error::Result;
use crate::record::SyncedRecord;

impl SyncedRecord for SetLocal {
    const TABLE: Table = Table::Sets;

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(SetLocal {
            envelope: Envelope {
                id: row.get("id")?,
                user_id: row.get("user_id")?,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
                synced: row.get("synced")?,
            },
            payload: SetPayload {
                workout_log_id: row.get("workout_log_id")?,
                exercise_id: row.get("exercise_id")?,
                exercise_name: row.get("exercise_name")?,
                weight: row.get("weight")?,
                reps: row.get("reps")?,
                rpe: row.get("rpe")?,
                voice_command_id: row.get("voice_command_id")?,
            },
        })
    }

    fn upsert(&self, conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO sets
                (id, user_id, created_at, updated_at, synced, workout_log_id, exercise_id,
                 exercise_name, weight, reps, rpe, voice_command_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                self.envelope.id,
                self.envelope.user_id,
                self.envelope.created_at,
                self.envelope.updated_at,
                self.envelope.synced,
                self.payload.workout_log_id,
                self.payload.exercise_id,
                self.payload.exercise_name,
                self.payload.weight,
                self.payload.reps,
                self.payload.rpe,
                self.payload.voice_command_id,
            ],
        )?;
        Ok(())
    }
}
