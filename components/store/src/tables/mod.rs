/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

pub mod message;
pub mod pr_history;
pub mod readiness_score;
pub mod run;
pub mod set;
pub mod workout_log;
