/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Last-write-wins over `updated_at`. Pure and stateless: it never touches
//! storage or the network, only the two timestamps it's handed.

/// What the Downloader should do with a decoded remote row once it knows
/// whether a local row with the same id already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// No local row with this id: insert the remote row as new, `synced = true`.
    InsertNew,
    /// Remote is strictly newer: overwrite the local row, `synced = true`.
    TakeRemote,
    /// Local is newer or equal: leave local untouched; it will be uploaded
    /// on the next pass.
    KeepLocal,
}

/// `local_updated_at` is `None` when no local row with the remote row's id
/// exists yet. Equal timestamps favor local, per the documented tiebreaker:
/// equality implies the remote row was itself derived from this local write.
pub fn resolve(local_updated_at: Option<i64>, remote_updated_at: i64) -> Decision {
    match local_updated_at {
        None => Decision::InsertNew,
        Some(local) if remote_updated_at > local => Decision::TakeRemote,
        Some(_) => Decision::KeepLocal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_inserts() {
        assert_eq!(resolve(None, 1000), Decision::InsertNew);
    }

    #[test]
    fn strictly_newer_remote_wins() {
        assert_eq!(resolve(Some(6000), 7000), Decision::TakeRemote);
    }

    #[test]
    fn older_remote_keeps_local() {
        assert_eq!(resolve(Some(8000), 5000), Decision::KeepLocal);
    }

    #[test]
    fn equal_timestamps_favor_local() {
        assert_eq!(resolve(Some(5000), 5000), Decision::KeepLocal);
    }
}
