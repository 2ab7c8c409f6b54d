/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! C6: per-table loop over the change log (C5), pushing each unsynced row
//! through the codec and the remote adapter, marking it synced on success.

use fitsync_store::{LocalStore, SyncedRecord};
use interrupt_support::CancellationToken;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::codec_bridge::ToRemote;
use crate::error::Result;
use crate::remote::{RemoteError, RemoteStore};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UploadStats {
    pub succeeded: usize,
    pub skipped: usize,
    /// Set when a permanent (auth) error aborted the table partway through.
    pub aborted: bool,
}

pub async fn upload_table<T, R>(
    store: &LocalStore,
    remote: &dyn RemoteStore,
    token: &CancellationToken,
) -> Result<UploadStats>
where
    T: SyncedRecord + ToRemote<R>,
    R: Serialize + DeserializeOwned,
{
    let rows: Vec<T> = store.unsynced()?;
    let mut stats = UploadStats::default();

    for row in rows {
        if token.is_cancelled() {
            break;
        }

        let remote_row = row.to_remote();
        let value = match serde_json::to_value(&remote_row) {
            Ok(v) => v,
            Err(e) => {
                warn!(table = %T::TABLE, op = "upload", id = %row.id(), kind = "codec", error = %e, "skipping poison row");
                stats.skipped += 1;
                continue;
            }
        };

        match remote.insert_or_update(T::TABLE, value).await {
            Ok(()) => {
                store.mark_synced::<T>(row.id())?;
                stats.succeeded += 1;
            }
            Err(RemoteError::Network(reason)) | Err(RemoteError::Other(reason)) => {
                debug!(table = %T::TABLE, op = "upload", id = %row.id(), kind = "transient", %reason, "skipping row for retry next cycle");
                stats.skipped += 1;
            }
            Err(RemoteError::Schema(reason)) => {
                warn!(table = %T::TABLE, op = "upload", id = %row.id(), kind = "schema", %reason, "remote rejected row");
                stats.skipped += 1;
            }
            Err(RemoteError::Auth) => {
                warn!(table = %T::TABLE, op = "upload", kind = "auth", "aborting sync cycle");
                stats.aborted = true;
                break;
            }
        }
    }

    Ok(stats)
}
