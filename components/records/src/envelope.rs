/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::clock::Clock;
use record_guid::RecordId;

/// Fields every syncable row carries, regardless of table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub id: RecordId,
    pub user_id: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub synced: bool,
}

impl Envelope {
    /// A brand-new envelope for a row created just now.
    pub fn new(user_id: impl Into<String>, clock: &dyn Clock) -> Self {
        let now = clock.now_ms();
        Envelope {
            id: RecordId::random(),
            user_id: user_id.into(),
            created_at: now,
            updated_at: now,
            synced: false,
        }
    }

    /// Bump `updated_at` and mark unsynced, as every local mutation must.
    pub fn touch(&mut self, clock: &dyn Clock) {
        self.updated_at = clock.now_ms();
        self.synced = false;
    }
}
