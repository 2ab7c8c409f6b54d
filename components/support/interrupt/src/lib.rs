/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// Helps manage "interruptable" things across our various crates.

mod token;

pub use token::CancellationToken;

/// Represents the state of something that may be interrupted. Decoupled from
/// the thing doing the cancelling so that code which wants to check if it's
/// been interrupted doesn't need to know about the interrupt mechanics.
pub trait Interruptee {
    fn was_interrupted(&self) -> bool;

    fn err_if_interrupted(&self) -> std::result::Result<(), Interrupted> {
        if self.was_interrupted() {
            Err(Interrupted)
        } else {
            Ok(())
        }
    }
}

/// A convenience implementation, should only be used in tests.
pub struct NeverInterrupts;

impl Interruptee for NeverInterrupts {
    #[inline]
    fn was_interrupted(&self) -> bool {
        false
    }
}

/// The error returned by err_if_interrupted.
#[derive(Debug, thiserror::Error)]
#[error("the operation was interrupted")]
pub struct Interrupted;
