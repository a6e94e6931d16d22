//! Cross-thread visibility flush.
//!
//! One thread may build and configure entities while another calls
//! `update`. The barrier is a single atomic counter owned by the
//! engine instance: [`SyncBarrier::publish`] after mutating,
//! [`SyncBarrier::acquire`] before reading, together forming a
//! release/acquire happens-before edge. It provides visibility only,
//! never mutual exclusion; concurrent mutation remains a caller error.

use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Default)]
pub struct SyncBarrier {
    counter: AtomicU32,
    enabled: bool,
}

impl SyncBarrier {
    /// Disabled barriers compile down to nothing, for strictly
    /// single-threaded callers (`Config::unsafe_no_sync`).
    pub fn new(enabled: bool) -> Self {
        Self {
            counter: AtomicU32::new(0),
            enabled,
        }
    }

    /// Release fence: make all prior writes visible to the next
    /// `acquire` on any thread.
    pub fn publish(&self) {
        if self.enabled {
            self.counter.fetch_add(1, Ordering::Release);
        }
    }

    /// Acquire fence, returning the publish generation observed.
    pub fn acquire(&self) -> u32 {
        if self.enabled {
            self.counter.load(Ordering::Acquire)
        } else {
            0
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
