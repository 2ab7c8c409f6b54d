/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The local change log lives here too: every write clears `synced`, and
//! `unsynced` is just a query over that same column, so there is no separate
//! log table to keep consistent with the rows it describes.

use std::path::Path;

use fitsync_records::Clock;
use parking_lot::Mutex;
use record_guid::RecordId;
use rusqlite::{Connection, Transaction};
use sql_support::open_database::{
    open_database_with_flags, read_write_flags, unique_in_memory_db_path, ConnectionInitializer,
};

use crate::error::{Error, Result};
use crate::record::SyncedRecord;

/// A handle to the on-device SQLite database holding every synced table.
///
/// One `LocalStore` per app process is typical; it is `Send + Sync` and
/// serializes writers behind an internal mutex, the same tradeoff the schema
/// it implements makes explicit (C2/C5 in the component table).
pub struct LocalStore {
    conn: Mutex<Connection>,
}

impl LocalStore {
    pub fn open(path: impl AsRef<Path>, initializer: &impl ConnectionInitializer) -> Result<Self> {
        let conn = open_database_with_flags(path, read_write_flags(), initializer)?;
        Ok(LocalStore {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory(initializer: &impl ConnectionInitializer) -> Result<Self> {
        let conn =
            open_database_with_flags(unique_in_memory_db_path(), read_write_flags(), initializer)?;
        Ok(LocalStore {
            conn: Mutex::new(conn),
        })
    }

    pub fn get<T: SyncedRecord>(&self, id: &RecordId) -> Result<Option<T>> {
        let conn = self.conn.lock();
        get_in_conn(&conn, id)
    }

    /// Insert a brand-new row, or overwrite an existing one with the same id.
    /// Both local mutations and applying a downloaded remote record funnel
    /// through this one upsert, per the resolved "is upsert required" question.
    pub fn create<T: SyncedRecord>(&self, record: &T) -> Result<()> {
        let conn = self.conn.lock();
        record.upsert(&conn)
    }

    /// Load `id`, apply `mutate`, bump its envelope, and write it back, all
    /// inside one transaction so a concurrent writer can't commit between the
    /// read and the write and get clobbered. Fails with `Error::NotFound` if
    /// no such row exists.
    pub fn update<T: SyncedRecord>(
        &self,
        id: &RecordId,
        clock: &dyn Clock,
        mutate: impl FnOnce(&mut T),
    ) -> Result<T> {
        self.write_txn(|tx| {
            let mut record: T = get_in_conn(tx, id)?.ok_or(Error::NotFound)?;
            mutate(&mut record);
            record.envelope_mut().touch(clock);
            record.upsert(tx)?;
            Ok(record)
        })
    }

    /// Mark a row synced after a successful upload, without touching its
    /// `updated_at` (a successful upload is not itself a local mutation).
    pub fn mark_synced<T: SyncedRecord>(&self, id: &RecordId) -> Result<()> {
        let conn = self.conn.lock();
        let sql = format!("UPDATE {} SET synced = 1 WHERE id = ?1", T::TABLE.name());
        conn.execute(&sql, [id.as_str()])?;
        Ok(())
    }

    /// Every row of `T::TABLE` with `synced = 0`: the change log the uploader
    /// walks.
    pub fn unsynced<T: SyncedRecord>(&self) -> Result<Vec<T>> {
        self.query_rows::<T>(&format!(
            "SELECT * FROM {} WHERE synced = 0 ORDER BY updated_at ASC",
            T::TABLE.name()
        ))
    }

    /// `count(unsynced(table))`, for a status snapshot that shouldn't have to
    /// materialize every pending row.
    pub fn count_unsynced<T: SyncedRecord>(&self) -> Result<i64> {
        let conn = self.conn.lock();
        let sql = format!("SELECT count(*) FROM {} WHERE synced = 0", T::TABLE.name());
        Ok(conn.query_row(&sql, (), |row| row.get(0))?)
    }

    /// Every row of `T::TABLE` updated strictly after `since_ms`, ordered by
    /// `updated_at`: the page the downloader asks the remote store for past a
    /// watermark.
    pub fn updated_after<T: SyncedRecord>(&self, since_ms: i64) -> Result<Vec<T>> {
        let conn = self.conn.lock();
        let sql = format!(
            "SELECT * FROM {} WHERE updated_at > ?1 ORDER BY updated_at ASC",
            T::TABLE.name()
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([since_ms])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(T::from_row(row)?);
        }
        Ok(out)
    }

    /// The high-water mark the downloader should resume from next time: the
    /// newest `updated_at` currently on disk for `T::TABLE`, or 0 if empty.
    pub fn max_updated_at<T: SyncedRecord>(&self) -> Result<i64> {
        let conn = self.conn.lock();
        let sql = format!("SELECT COALESCE(MAX(updated_at), 0) FROM {}", T::TABLE.name());
        Ok(conn.query_row(&sql, (), |row| row.get(0))?)
    }

    fn query_rows<T: SyncedRecord>(&self, sql: &str) -> Result<Vec<T>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(())?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(T::from_row(row)?);
        }
        Ok(out)
    }

    /// Run `f` inside one transaction, so a caller writing several tables
    /// (e.g. a workout log and its sets) either commits all of them or none.
    pub fn write_txn<R>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<R>) -> Result<R> {
        let mut conn = self.conn.lock();
        let tx = conn.unchecked_transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}

/// Look up one row of `T::TABLE` by id against an already-open connection or
/// transaction. Exposed so callers composing their own multi-table write
/// transactions (the downloader, applying conflict resolution per row) can
/// read without re-entering `LocalStore`'s mutex.
pub fn get_in_conn<T: SyncedRecord>(conn: &Connection, id: &RecordId) -> Result<Option<T>> {
    let sql = format!("SELECT * FROM {} WHERE id = ?1", T::TABLE.name());
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([id.as_str()])?;
    match rows.next()? {
        Some(row) => Ok(Some(T::from_row(row)?)),
        None => Ok(None),
    }
}
