/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::Interruptee;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation token for a single sync session.
///
/// Unlike a process-global interrupt counter, a `CancellationToken` is owned
/// by whoever starts the cancellable operation (here, a `SyncOrchestrator`)
/// and cloned to whatever needs to observe it. Cancelling one orchestrator's
/// token has no effect on any other orchestrator's token, which matters once
/// more than one session can be alive in the same process.
///
/// Checked between rows/tables, not preemptive: in-flight blocking I/O is not
/// interrupted, only the next checkpoint after it returns.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Interruptee for CancellationToken {
    #[inline]
    fn was_interrupted(&self) -> bool {
        self.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uncancelled() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.err_if_interrupted().is_ok());
    }

    #[test]
    fn clone_shares_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        assert!(token.err_if_interrupted().is_err());
    }

    #[test]
    fn independent_tokens_do_not_interfere() {
        let a = CancellationToken::new();
        let b = CancellationToken::new();
        a.cancel();
        assert!(a.is_cancelled());
        assert!(!b.is_cancelled());
    }
}
