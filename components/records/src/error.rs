/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use thiserror::Error;

/// Failure converting between the local and remote shapes of a row. Per row,
/// never per table or per cycle: callers skip the offending row and keep
/// going.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("invalid JSON in blob field {field}: {source}")]
    InvalidJson {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CodecError>;
