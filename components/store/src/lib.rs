/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The on-device SQLite store: schema, the generic CRUD/query surface used by
//! every table (`LocalStore`), and the local change log it doubles as.

pub mod error;
pub mod local_store;
pub mod record;
pub mod schema;
mod tables;

pub use error::{Error, Result};
pub use local_store::{get_in_conn, LocalStore};
pub use record::SyncedRecord;
pub use schema::FitsyncConnectionInitializer;
