/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! C9: the public entry point. One `SyncOrchestrator` per logged-in session —
//! an explicit handle, not a process-global singleton, per the anti-singleton
//! redesign note. Owns the periodic timer, the in-progress flag, and the
//! cancellation token the orchestrator's children check between rows/tables.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use fitsync_records::tables::{message, pr_history, readiness_score, run, set, workout_log};
use fitsync_store::LocalStore;
use interrupt_support::CancellationToken;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::download::download_table;
use crate::remote::RemoteStore;
use crate::upload::upload_table;

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub tick_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            tick_interval: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SyncStatus {
    pub is_syncing: bool,
    pub unsynced_counts: BTreeMap<&'static str, i64>,
}

/// Every table's upload runs, then every table's download runs, in this
/// exact order. Parents precede children so foreign keys resolve.
macro_rules! for_each_table {
    ($mac:ident) => {
        $mac!(workout_log::WorkoutLogLocal, workout_log::WorkoutLogRemote);
        $mac!(set::SetLocal, set::SetRemote);
        $mac!(run::RunLocal, run::RunRemote);
        $mac!(message::MessageLocal, message::MessageRemote);
        $mac!(
            readiness_score::ReadinessScoreLocal,
            readiness_score::ReadinessScoreRemote
        );
        $mac!(pr_history::PrHistoryLocal, pr_history::PrHistoryRemote);
    };
}

pub struct SyncOrchestrator {
    store: Arc<LocalStore>,
    remote: Arc<dyn RemoteStore>,
    config: SyncConfig,
    token: CancellationToken,
    /// Serializes `full_sync` invocations: held for the duration of one
    /// cycle, so a second caller blocks until the in-flight one finishes
    /// rather than starting its own (coalescing concurrent `sync_now`s).
    sync_lock: Arc<AsyncMutex<()>>,
    tick_handle: AsyncMutex<Option<JoinHandle<()>>>,
}

impl SyncOrchestrator {
    pub fn new(store: Arc<LocalStore>, remote: Arc<dyn RemoteStore>, config: SyncConfig) -> Self {
        SyncOrchestrator {
            store,
            remote,
            config,
            token: CancellationToken::new(),
            sync_lock: Arc::new(AsyncMutex::new(())),
            tick_handle: AsyncMutex::new(None),
        }
    }

    /// Idempotent: a second call while already running is a no-op. Runs one
    /// full sync immediately, then schedules a repeating tick.
    pub async fn start(&self, user_id: String) {
        let mut handle = self.tick_handle.lock().await;
        if handle.is_some() {
            return;
        }

        self.full_sync(user_id.clone()).await;

        let store = self.store.clone();
        let remote = self.remote.clone();
        let sync_lock = self.sync_lock.clone();
        let token = self.token.clone();
        let interval = self.config.tick_interval;

        *handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // first tick fires immediately; skip it, we just synced
            loop {
                ticker.tick().await;
                if token.is_cancelled() {
                    break;
                }
                let _guard = sync_lock.lock().await;
                if token.is_cancelled() {
                    break;
                }
                run_full_sync(&store, remote.as_ref(), &user_id, &token).await;
            }
        }));
    }

    /// Cancels the timer and awaits the in-flight sync, if any, to drain.
    pub async fn stop(&self) {
        self.token.cancel();
        if let Some(handle) = self.tick_handle.lock().await.take() {
            let _ = handle.await;
        }
        // A sync that had already taken the lock before `cancel()` runs to
        // completion; wait for it so no adapter call is still in flight when
        // `stop()` returns.
        let _guard = self.sync_lock.lock().await;
    }

    /// An out-of-band full sync. If one is already in progress, this waits
    /// for it rather than starting a second (the in-flight run satisfies the
    /// request).
    pub async fn sync_now(&self, user_id: String) {
        self.full_sync(user_id).await;
    }

    /// Runs Upload then Download for every registered table, in table order.
    /// Errors are caught and logged per table; they never stop the others.
    pub async fn full_sync(&self, user_id: String) {
        let _guard = self.sync_lock.lock().await;
        if self.token.is_cancelled() {
            return;
        }
        run_full_sync(&self.store, self.remote.as_ref(), &user_id, &self.token).await;
    }

    pub fn status(&self) -> SyncStatus {
        let is_syncing = self.sync_lock.try_lock().is_err();
        let mut unsynced_counts = BTreeMap::new();
        macro_rules! count {
            ($local:ty, $remote:ty) => {
                if let Ok(n) = self.store.count_unsynced::<$local>() {
                    unsynced_counts.insert(<$local as fitsync_store::SyncedRecord>::TABLE.name(), n);
                }
            };
        }
        for_each_table!(count);
        SyncStatus {
            is_syncing,
            unsynced_counts,
        }
    }
}

async fn run_full_sync(
    store: &LocalStore,
    remote: &dyn RemoteStore,
    user_id: &str,
    token: &CancellationToken,
) {
    macro_rules! do_upload {
        ($local:ty, $remote:ty) => {
            if token.is_cancelled() {
                return;
            }
            match upload_table::<$local, $remote>(store, remote, token).await {
                Ok(stats) => info!(op = "upload", succeeded = stats.succeeded, skipped = stats.skipped, "upload pass complete"),
                Err(e) => warn!(op = "upload", error = %e, "upload pass failed for table"),
            }
        };
    }
    for_each_table!(do_upload);

    if token.is_cancelled() {
        return;
    }

    macro_rules! do_download {
        ($local:ty, $remote:ty) => {
            if token.is_cancelled() {
                return;
            }
            match download_table::<$local, $remote>(store, remote, user_id, token).await {
                Ok(stats) => info!(
                    op = "download",
                    inserted = stats.inserted,
                    overwritten = stats.overwritten,
                    kept_local = stats.kept_local,
                    "download pass complete"
                ),
                Err(e) => warn!(op = "download", error = %e, "download pass failed for table"),
            }
        };
    }
    for_each_table!(do_download);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, MockRemoteStore};
    use fitsync_records::tables::workout_log::{WorkoutLogLocal, WorkoutLogPayload};
    use fitsync_records::{Envelope, SystemClock};
    use fitsync_store::FitsyncConnectionInitializer;

    fn orchestrator(store: Arc<LocalStore>, remote: Arc<MockRemoteStore>) -> SyncOrchestrator {
        SyncOrchestrator::new(store, remote, SyncConfig::default())
    }

    #[tokio::test]
    async fn full_sync_uploads_every_table_before_downloading_any() {
        let store = Arc::new(LocalStore::open_in_memory(&FitsyncConnectionInitializer).unwrap());
        let row = WorkoutLogLocal {
            envelope: Envelope::new("u1", &SystemClock),
            payload: WorkoutLogPayload {
                workout_name: "Push".into(),
                start_time: 1_000,
                end_time: None,
            },
        };
        store.create(&row).unwrap();

        let remote = Arc::new(MockRemoteStore::new());
        let orch = orchestrator(store, remote.clone());
        orch.sync_now("u1".into()).await;

        let calls = remote.calls();
        let last_insert = calls.iter().rposition(|c| matches!(c, Call::Insert(..)));
        let first_select = calls.iter().position(|c| matches!(c, Call::Select(..)));
        // Every insert (upload) precedes every select (download) within one cycle.
        if let (Some(last_insert), Some(first_select)) = (last_insert, first_select) {
            assert!(last_insert < first_select);
        }
        assert!(calls.iter().any(|c| matches!(c, Call::Insert(..))));
        assert!(calls.iter().any(|c| matches!(c, Call::Select(..))));
    }

    #[tokio::test]
    async fn status_reports_unsynced_counts_and_syncing_flag() {
        let store = Arc::new(LocalStore::open_in_memory(&FitsyncConnectionInitializer).unwrap());
        let remote = Arc::new(MockRemoteStore::new());
        let orch = orchestrator(store.clone(), remote);

        let status = orch.status();
        assert!(!status.is_syncing);
        assert_eq!(status.unsynced_counts.get("workout_logs"), Some(&0));

        let row = WorkoutLogLocal {
            envelope: Envelope::new("u1", &SystemClock),
            payload: WorkoutLogPayload {
                workout_name: "Push".into(),
                start_time: 1_000,
                end_time: None,
            },
        };
        store.create(&row).unwrap();
        let status = orch.status();
        assert_eq!(status.unsynced_counts.get("workout_logs"), Some(&1));

        orch.sync_now("u1".into()).await;
        let status = orch.status();
        assert_eq!(status.unsynced_counts.get("workout_logs"), Some(&0));
    }

    #[tokio::test]
    async fn stop_cancels_the_tick_loop_and_drains_in_flight_work() {
        let store = Arc::new(LocalStore::open_in_memory(&FitsyncConnectionInitializer).unwrap());
        let remote = Arc::new(MockRemoteStore::new());
        let orch = orchestrator(store, remote);

        orch.start("u1".into()).await;
        orch.stop().await;
        assert!(!orch.status().is_syncing);
    }
}
