/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! A fake `RemoteStore` for exercising the uploader/downloader/orchestrator
//! without real HTTP. Tests configure per-id failures and inspect the call
//! log to assert ordering and idempotence.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use fitsync_records::Table;
use serde_json::Value;

use crate::remote::{RemoteError, RemoteStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Insert(&'static str, String),
    Select(&'static str),
}

#[derive(Default)]
pub struct MockRemoteStore {
    rows: Mutex<HashMap<(&'static str, String), Value>>,
    /// ids that should fail their next insert with this error, consumed once.
    fail_once: Mutex<HashMap<String, RemoteError>>,
    calls: Mutex<Vec<Call>>,
}

impl MockRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, table: Table, id: &str, row: Value) {
        self.rows
            .lock()
            .unwrap()
            .insert((table.name(), id.to_string()), row);
    }

    pub fn fail_once(&self, id: &str, err: RemoteError) {
        self.fail_once.lock().unwrap().insert(id.to_string(), err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn row(&self, table: Table, id: &str) -> Option<Value> {
        self.rows
            .lock()
            .unwrap()
            .get(&(table.name(), id.to_string()))
            .cloned()
    }
}

#[async_trait]
impl RemoteStore for MockRemoteStore {
    async fn insert_or_update(&self, table: Table, row: Value) -> Result<(), RemoteError> {
        let id = row["id"].as_str().unwrap_or_default().to_string();
        self.calls
            .lock()
            .unwrap()
            .push(Call::Insert(table.name(), id.clone()));
        if let Some(err) = self.fail_once.lock().unwrap().remove(&id) {
            return Err(err);
        }
        self.rows
            .lock()
            .unwrap()
            .insert((table.name(), id), row);
        Ok(())
    }

    async fn select(
        &self,
        table: Table,
        _user_id: &str,
        updated_after_ms: i64,
    ) -> Result<Vec<Value>, RemoteError> {
        self.calls.lock().unwrap().push(Call::Select(table.name()));
        let rows = self.rows.lock().unwrap();
        let mut matched: Vec<Value> = rows
            .iter()
            .filter(|((t, _), _)| *t == table.name())
            .filter(|(_, v)| {
                v["updated_at"]
                    .as_str()
                    .and_then(|s| fitsync_records::codec::iso8601_to_ms(s).ok())
                    .map(|ms| ms > updated_after_ms)
                    .unwrap_or(true)
            })
            .map(|(_, v)| v.clone())
            .collect();
        matched.sort_by_key(|v| v["updated_at"].as_str().unwrap_or_default().to_string());
        Ok(matched)
    }
}
