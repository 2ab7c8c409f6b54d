/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::remote::RemoteError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("local store error: {0}")]
    Store(#[from] fitsync_store::Error),
    #[error("remote store error: {0}")]
    Remote(#[from] RemoteError),
    #[error("record codec error: {0}")]
    Codec(#[from] fitsync_records::CodecError),
    #[error("row encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("interrupted")]
    Interrupted(#[from] interrupt_support::Interrupted),
}
