/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use rusqlite::{Connection, Transaction};
use sql_support::open_database::{self, ConnectionInitializer};
use sql_support::setup_sqlite_defaults;

/// Every envelope column, shared verbatim by all six tables.
const ENVELOPE_COLUMNS: &str = "
    id TEXT NOT NULL PRIMARY KEY,
    user_id TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    synced INTEGER NOT NULL
";

/// Schema placeholder type: `prepare`/`init`/`upgrade_from` bring a connection
/// up to `END_VERSION`, per the open-database contract.
#[derive(Debug, Default)]
pub struct FitsyncConnectionInitializer;

impl ConnectionInitializer for FitsyncConnectionInitializer {
    const NAME: &'static str = "fitsync-store";
    const END_VERSION: u32 = 1;

    fn prepare(&self, conn: &Connection, _db_empty: bool) -> open_database::Result<()> {
        setup_sqlite_defaults(conn)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }

    fn init(&self, db: &Transaction<'_>) -> open_database::Result<()> {
        db.execute_batch(&schema_v1())?;
        Ok(())
    }

    fn upgrade_from(&self, _db: &Transaction<'_>, version: u32) -> open_database::Result<()> {
        Err(open_database::Error::IncompatibleVersion(version))
    }
}

fn schema_v1() -> String {
    format!(
        "
        CREATE TABLE workout_logs (
            {envelope},
            workout_name TEXT NOT NULL,
            start_time INTEGER NOT NULL,
            end_time INTEGER
        );
        CREATE INDEX idx_workout_logs_synced ON workout_logs (synced);
        CREATE INDEX idx_workout_logs_updated_at ON workout_logs (updated_at);

        CREATE TABLE sets (
            {envelope},
            workout_log_id TEXT NOT NULL REFERENCES workout_logs(id),
            exercise_id TEXT NOT NULL,
            exercise_name TEXT NOT NULL,
            weight REAL NOT NULL,
            reps INTEGER NOT NULL,
            rpe REAL,
            voice_command_id TEXT
        );
        CREATE INDEX idx_sets_synced ON sets (synced);
        CREATE INDEX idx_sets_updated_at ON sets (updated_at);
        CREATE INDEX idx_sets_workout_log_id ON sets (workout_log_id);

        CREATE TABLE runs (
            {envelope},
            start_time INTEGER NOT NULL,
            end_time INTEGER NOT NULL,
            distance REAL NOT NULL,
            duration REAL NOT NULL,
            pace REAL NOT NULL,
            avg_speed REAL NOT NULL,
            calories REAL NOT NULL,
            elevation_gain REAL NOT NULL,
            elevation_loss REAL NOT NULL,
            grade_adjusted_pace REAL,
            grade_percent REAL NOT NULL,
            terrain_difficulty TEXT NOT NULL,
            route TEXT NOT NULL,
            workout_type TEXT,
            workout_name TEXT
        );
        CREATE INDEX idx_runs_synced ON runs (synced);
        CREATE INDEX idx_runs_updated_at ON runs (updated_at);

        CREATE TABLE messages (
            {envelope},
            text TEXT NOT NULL,
            sender TEXT NOT NULL,
            message_type TEXT NOT NULL,
            data TEXT
        );
        CREATE INDEX idx_messages_synced ON messages (synced);
        CREATE INDEX idx_messages_updated_at ON messages (updated_at);

        CREATE TABLE readiness_scores (
            {envelope},
            date INTEGER NOT NULL,
            score INTEGER NOT NULL,
            readiness_type TEXT NOT NULL,
            emoji TEXT,
            sleep_quality INTEGER,
            soreness INTEGER,
            stress INTEGER,
            energy INTEGER,
            notes TEXT
        );
        CREATE INDEX idx_readiness_scores_synced ON readiness_scores (synced);
        CREATE INDEX idx_readiness_scores_updated_at ON readiness_scores (updated_at);

        CREATE TABLE pr_history (
            {envelope},
            exercise_id TEXT NOT NULL,
            exercise_name TEXT NOT NULL,
            one_rm REAL NOT NULL,
            weight REAL NOT NULL,
            reps INTEGER NOT NULL,
            workout_log_id TEXT NOT NULL REFERENCES workout_logs(id),
            achieved_at INTEGER NOT NULL
        );
        CREATE INDEX idx_pr_history_synced ON pr_history (synced);
        CREATE INDEX idx_pr_history_updated_at ON pr_history (updated_at);
        CREATE INDEX idx_pr_history_workout_log_id ON pr_history (workout_log_id);
        ",
        envelope = ENVELOPE_COLUMNS
    )
}
