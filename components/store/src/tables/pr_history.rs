/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use fitsync_records::tables::pr_history::{PrHistoryLocal, PrHistoryPayload};
use fitsync_records::{Envelope, Table};
use rusqlite::{params, Connection, Row};

use crate::error::Result;
use crate::record::SyncedRecord;

impl SyncedRecord for PrHistoryLocal {
    const TABLE: Table = Table::PrHistory;

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PrHistoryLocal {
            envelope: Envelope {
                id: row.get("id")?,
                user_id: row.get("user_id")?,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
                synced: row.get("synced")?,
            },
            payload: PrHistoryPayload {
                exercise_id: row.get("exercise_id")?,
                exercise_name: row.get("exercise_name")?,
                one_rm: row.get("one_rm")?,
                weight: row.get("weight")?,
                reps: row.get("reps")?,
                workout_log_id: row.get("workout_log_id")?,
                achieved_at: row.get("achieved_at")?,
            },
        })
    }

    fn upsert(&self, conn: &Connection) -> Result<()> {
        let p = &self.payload;
        conn.execute(
            "INSERT OR REPLACE INTO pr_history
                (id, user_id, created_at, updated_at, synced, exercise_id, exercise_name,
                 one_rm, weight, reps, workout_log_id, achieved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                self.envelope.id,
                self.envelope.user_id,
                self.envelope.created_at,
                self.envelope.updated_at,
                self.envelope.synced,
                p.exercise_id,
                p.exercise_name,
                p.one_rm,
                p.weight,
                p.reps,
                p.workout_log_id,
                p.achieved_at,
            ],
        )?;
        Ok(())
    }
}
