/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! A thin, uniform façade over the cloud relational store. Column-name and
//! timestamp-format translation is the Record Codec's job (`crate::codec`);
//! this trait only moves already-encoded JSON rows across the wire.

use async_trait::async_trait;
use fitsync_records::Table;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),
    #[error("authentication expired")]
    Auth,
    #[error("remote schema rejected the row: {0}")]
    Schema(String),
    #[error("remote store error: {0}")]
    Other(String),
}

/// Bearer credential and logged-in user, supplied by the host app's session
/// layer (out of scope for this crate beyond this seam).
pub trait SessionProvider: Send + Sync {
    fn user_id(&self) -> Option<String>;
    fn bearer_token(&self) -> Option<String>;
}

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Insert `row` into `table`, or update it in place if a row with the
    /// same `id` already exists remotely. A duplicate-id response from a
    /// plain insert-only backend is itself success, per the idempotency
    /// contract; implementations fold that into `Ok(())` rather than
    /// surfacing it as an error.
    async fn insert_or_update(&self, table: Table, row: Value) -> Result<(), RemoteError>;

    /// All rows of `table` owned by `user_id` with `updated_at` strictly
    /// greater than `updated_after_ms`, ordered by `updated_at` ascending.
    async fn select(
        &self,
        table: Table,
        user_id: &str,
        updated_after_ms: i64,
    ) -> Result<Vec<Value>, RemoteError>;
}

/// `RemoteStore` backed by an HTTP JSON API: `POST /{table}` to upsert,
/// `GET /{table}?user_id=...&updated_after=...` to page rows newer than a
/// watermark.
pub struct HttpRemoteStore<S> {
    base_url: String,
    client: reqwest::Client,
    session: S,
}

impl<S: SessionProvider> HttpRemoteStore<S> {
    pub fn new(base_url: impl Into<String>, session: S) -> Self {
        HttpRemoteStore {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            session,
        }
    }

    fn bearer(&self) -> Result<String, RemoteError> {
        self.session.bearer_token().ok_or(RemoteError::Auth)
    }

    fn classify(err: reqwest::Error) -> RemoteError {
        if err.is_timeout() || err.is_connect() {
            RemoteError::Network(err.to_string())
        } else if err.status().map(|s| s.as_u16()) == Some(401) {
            RemoteError::Auth
        } else {
            RemoteError::Other(err.to_string())
        }
    }
}

#[async_trait]
impl<S: SessionProvider> RemoteStore for HttpRemoteStore<S> {
    async fn insert_or_update(&self, table: Table, row: Value) -> Result<(), RemoteError> {
        let token = self.bearer()?;
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, table.name()))
            .bearer_auth(token)
            .json(&row)
            .send()
            .await
            .map_err(Self::classify)?;

        match response.status().as_u16() {
            200..=299 | 409 => Ok(()), // 409 Conflict == duplicate_id == success
            401 => Err(RemoteError::Auth),
            422 => Err(RemoteError::Schema(
                response.text().await.unwrap_or_default(),
            )),
            other => Err(RemoteError::Other(format!("unexpected status {other}"))),
        }
    }

    async fn select(
        &self,
        table: Table,
        user_id: &str,
        updated_after_ms: i64,
    ) -> Result<Vec<Value>, RemoteError> {
        let token = self.bearer()?;
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, table.name()))
            .bearer_auth(token)
            .query(&[
                ("user_id", user_id.to_string()),
                ("updated_after", updated_after_ms.to_string()),
            ])
            .send()
            .await
            .map_err(Self::classify)?;

        match response.status().as_u16() {
            200..=299 => response
                .json::<Vec<Value>>()
                .await
                .map_err(|e| RemoteError::Other(e.to_string())),
            401 => Err(RemoteError::Auth),
            other => Err(RemoteError::Other(format!("unexpected status {other}"))),
        }
    }
}
