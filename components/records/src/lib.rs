/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Record shapes shared between the local store and the remote adapter:
//! the common envelope, the clock, the registered-table list, and the
//! per-table local/remote codec pairs.

pub mod clock;
pub mod codec;
pub mod envelope;
pub mod error;
pub mod table;
pub mod tables;

pub use clock::{Clock, SystemClock};
pub use envelope::Envelope;
pub use error::{CodecError, Result};
pub use table::Table;
