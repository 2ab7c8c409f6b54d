/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The seam between a record's Rust shape (`fitsync_records::tables::*`) and
//! its row in SQLite. Each table module implements this once.

use fitsync_records::{Envelope, Table};
use record_guid::RecordId;
use rusqlite::{Connection, Row};

use crate::error::Result;

/// A record type that can be stored as a row of `Self::TABLE`.
///
/// Implementors own both directions: reading a `Row` back into the typed
/// struct, and writing the struct out as an upsert. Keeping both next to each
/// other means the column list can never drift between the two directions.
pub trait SyncedRecord: Sized {
    const TABLE: Table;

    fn envelope(&self) -> &Envelope;
    fn envelope_mut(&mut self) -> &mut Envelope;

    fn id(&self) -> &RecordId {
        &self.envelope().id
    }

    /// Build one instance from a row of `Self::TABLE` (a `SELECT *`, column order
    /// matching `CREATE TABLE`).
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// `INSERT OR REPLACE` this record's full row. Used for both local writes
    /// and applying a downloaded remote record, so the two agree on storage.
    fn upsert(&self, conn: &Connection) -> Result<()>;
}
