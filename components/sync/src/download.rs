/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! C7: per-table loop reading remote rows newer than the local high-water
//! mark, applying C8's decision for each inside one write transaction.

use fitsync_store::{get_in_conn, LocalStore, SyncedRecord};
use interrupt_support::CancellationToken;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::codec_bridge::FromRemote;
use crate::conflict::{self, Decision};
use crate::error::Result;
use crate::remote::RemoteStore;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadStats {
    pub inserted: usize,
    pub overwritten: usize,
    pub kept_local: usize,
    pub skipped: usize,
}

pub async fn download_table<T, R>(
    store: &LocalStore,
    remote: &dyn RemoteStore,
    user_id: &str,
    token: &CancellationToken,
) -> Result<DownloadStats>
where
    T: SyncedRecord + FromRemote<R>,
    R: Serialize + DeserializeOwned,
{
    // Corrected per the resolved high-watermark question: filter on
    // `updated_at`, not `created_at`, so a remotely-updated row is re-read.
    let watermark = store.max_updated_at::<T>()?;
    let raw_rows = remote.select(T::TABLE, user_id, watermark).await?;
    if raw_rows.is_empty() {
        return Ok(DownloadStats::default());
    }

    let mut stats = DownloadStats::default();
    store.write_txn(|tx| {
        for raw in &raw_rows {
            if token.is_cancelled() {
                break;
            }

            let remote_row: R = match serde_json::from_value(raw.clone()) {
                Ok(r) => r,
                Err(e) => {
                    warn!(table = %T::TABLE, op = "download", kind = "codec", error = %e, "skipping poison remote row");
                    stats.skipped += 1;
                    continue;
                }
            };
            let candidate: T = match T::from_remote(remote_row) {
                Ok(c) => c,
                Err(e) => {
                    warn!(table = %T::TABLE, op = "download", kind = "codec", error = %e, "skipping poison remote row");
                    stats.skipped += 1;
                    continue;
                }
            };

            let existing: Option<T> = get_in_conn(tx, candidate.id())?;
            let decision = conflict::resolve(
                existing.as_ref().map(|e| e.envelope().updated_at),
                candidate.envelope().updated_at,
            );
            match decision {
                Decision::InsertNew => {
                    candidate.upsert(tx)?;
                    stats.inserted += 1;
                    debug!(table = %T::TABLE, op = "download", id = %candidate.id(), kind = "insert", "applied new remote row");
                }
                Decision::TakeRemote => {
                    candidate.upsert(tx)?;
                    stats.overwritten += 1;
                    debug!(table = %T::TABLE, op = "download", id = %candidate.id(), kind = "overwrite", "remote row was newer");
                }
                Decision::KeepLocal => {
                    stats.kept_local += 1;
                }
            }
        }
        Ok(())
    })?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRemoteStore;
    use fitsync_records::codec::ms_to_iso8601;
    use fitsync_records::tables::workout_log::{WorkoutLogLocal, WorkoutLogPayload};
    use fitsync_records::{Envelope, SystemClock, Table};
    use fitsync_store::FitsyncConnectionInitializer;
    use record_guid::RecordId;
    use serde_json::json;

    fn remote_workout(id: &str, user_id: &str, updated_at_ms: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "user_id": user_id,
            "created_at": ms_to_iso8601(updated_at_ms),
            "updated_at": ms_to_iso8601(updated_at_ms),
            "workout_name": name,
            "start_time": ms_to_iso8601(updated_at_ms),
        })
    }

    #[tokio::test]
    async fn remote_only_row_is_inserted() {
        let store = LocalStore::open_in_memory(&FitsyncConnectionInitializer).unwrap();
        let remote = MockRemoteStore::new();
        let id = RecordId::random();
        remote.seed(
            Table::WorkoutLogs,
            id.as_str(),
            remote_workout(id.as_str(), "u1", 5_000, "From Cloud"),
        );

        let stats =
            download_table::<WorkoutLogLocal, _>(&store, &remote, "u1", &CancellationToken::new())
                .await
                .unwrap();
        assert_eq!(stats.inserted, 1);
        assert_eq!(stats.overwritten, 0);

        let row: WorkoutLogLocal = store.get(&id).unwrap().unwrap();
        assert_eq!(row.payload.workout_name, "From Cloud");
        assert!(row.envelope.synced);
    }

    #[tokio::test]
    async fn download_is_idempotent_once_caught_up_to_the_watermark() {
        let store = LocalStore::open_in_memory(&FitsyncConnectionInitializer).unwrap();
        let remote = MockRemoteStore::new();
        let id = RecordId::random();
        remote.seed(
            Table::WorkoutLogs,
            id.as_str(),
            remote_workout(id.as_str(), "u1", 5_000, "From Cloud"),
        );

        download_table::<WorkoutLogLocal, _>(&store, &remote, "u1", &CancellationToken::new())
            .await
            .unwrap();
        let second =
            download_table::<WorkoutLogLocal, _>(&store, &remote, "u1", &CancellationToken::new())
                .await
                .unwrap();
        assert_eq!(second, DownloadStats::default());
    }

    #[tokio::test]
    async fn strictly_newer_remote_row_overwrites_local() {
        let store = LocalStore::open_in_memory(&FitsyncConnectionInitializer).unwrap();
        let mut envelope = Envelope::new("u1", &SystemClock);
        envelope.created_at = 1_000;
        envelope.updated_at = 1_000;
        let local = WorkoutLogLocal {
            envelope,
            payload: WorkoutLogPayload {
                workout_name: "Original".into(),
                start_time: 1_000,
                end_time: None,
            },
        };
        store.create(&local).unwrap();

        let remote = MockRemoteStore::new();
        remote.seed(
            Table::WorkoutLogs,
            local.envelope.id.as_str(),
            remote_workout(local.envelope.id.as_str(), "u1", 9_000, "Renamed Elsewhere"),
        );

        let stats =
            download_table::<WorkoutLogLocal, _>(&store, &remote, "u1", &CancellationToken::new())
                .await
                .unwrap();
        assert_eq!(stats.overwritten, 1);
        assert_eq!(stats.inserted, 0);

        let row: WorkoutLogLocal = store.get(&local.envelope.id).unwrap().unwrap();
        assert_eq!(row.payload.workout_name, "Renamed Elsewhere");
    }
}
