/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// Result type for internal errors.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no such record")]
    NotFound,
    #[error("error opening database: {0}")]
    OpenDatabase(#[from] sql_support::open_database::Error),
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
    #[error("record codec error: {0}")]
    Codec(#[from] fitsync_records::CodecError),
    #[error("interrupted")]
    Interrupted(#[from] interrupt_support::Interrupted),
}
