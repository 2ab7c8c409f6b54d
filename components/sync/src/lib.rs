/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The sync engine: remote adapter (C3), record codec bridge (C4 glue),
//! uploader (C6), downloader (C7), conflict resolver (C8), and the
//! orchestrator (C9) that drives them on a schedule.

mod codec_bridge;
pub mod conflict;
pub mod download;
pub mod error;
pub mod orchestrator;
pub mod remote;
#[cfg(test)]
mod test_support;
pub mod upload;

pub use conflict::Decision;
pub use download::{download_table, DownloadStats};
pub use error::{Error, Result};
pub use orchestrator::{SyncConfig, SyncOrchestrator, SyncStatus};
pub use remote::{RemoteError, RemoteStore, SessionProvider};
pub use upload::{upload_table, UploadStats};
