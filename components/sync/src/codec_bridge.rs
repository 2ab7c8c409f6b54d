/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Ties each table's local/remote codec pair (defined in `fitsync_records`)
//! into the two traits the Uploader and Downloader are generic over.

use fitsync_records::tables::{message, pr_history, readiness_score, run, set, workout_log};
use fitsync_records::Result as CodecResult;
use serde::{de::DeserializeOwned, Serialize};

/// Encode a local row to its wire shape.
pub trait ToRemote<R> {
    fn to_remote(&self) -> R;
}

/// Decode a wire row back to its local shape, marking it `synced = true`.
pub trait FromRemote<R>: Sized {
    fn from_remote(remote: R) -> CodecResult<Self>;
}

macro_rules! bridge {
    ($local:ty, $remote:ty) => {
        impl ToRemote<$remote> for $local {
            fn to_remote(&self) -> $remote {
                <$remote>::from(self)
            }
        }

        impl FromRemote<$remote> for $local {
            fn from_remote(remote: $remote) -> CodecResult<Self> {
                <$local>::from_remote(remote)
            }
        }
    };
}

bridge!(workout_log::WorkoutLogLocal, workout_log::WorkoutLogRemote);
bridge!(set::SetLocal, set::SetRemote);
bridge!(run::RunLocal, run::RunRemote);
bridge!(message::MessageLocal, message::MessageRemote);
bridge!(
    readiness_score::ReadinessScoreLocal,
    readiness_score::ReadinessScoreRemote
);
bridge!(pr_history::PrHistoryLocal, pr_history::PrHistoryRemote);

/// Marker bound bundling the two directions plus the serde bounds the
/// Uploader/Downloader need to move a remote row across `serde_json::Value`.
pub trait TableCodec<R>: ToRemote<R> + FromRemote<R>
where
    R: Serialize + DeserializeOwned,
{
}

impl<T, R> TableCodec<R> for T
where
    T: ToRemote<R> + FromRemote<R>,
    R: Serialize + DeserializeOwned,
{
}
