/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use fitsync_records::tables::workout_log::{WorkoutLogLocal, WorkoutLogPayload};
use fitsync_records::{Envelope, Table};
use rusqlite::{params, Connection, Row};

use crate::error::Result;
use crate::record::SyncedRecord;

impl SyncedRecord for WorkoutLogLocal {
    const TABLE: Table = Table::WorkoutLogs;

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(WorkoutLogLocal {
            envelope: Envelope {
                id: row.get("id")?,
                user_id: row.get("user_id")?,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
                synced: row.get("synced")?,
            },
            payload: WorkoutLogPayload {
                workout_name: row.get("workout_name")?,
                start_time: row.get("start_time")?,
                end_time: row.get("end_time")?,
            },
        })
    }

    fn upsert(&self, conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO workout_logs
                (id, user_id, created_at, updated_at, synced, workout_name, start_time, end_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                self.envelope.id,
                self.envelope.user_id,
                self.envelope.created_at,
                self.envelope.updated_at,
                self.envelope.synced,
                self.payload.workout_name,
                self.payload.start_time,
                self.payload.end_time,
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
        let local = WorkoutLogLocal {
            envelope: Envelope::new("u1", &SystemClock),
            payload: WorkoutLogPayload {
                workout_name: "Push Day".into(),
                start_time: 1_700_000_000_000,
                end_time: None,
            },
        };
        store.create(&local).unwrap();
        let back: WorkoutLogLocal = store.get(&local.envelope.id).unwrap().unwrap();
        assert_eq!(back.payload, local.payload);
    }
}
