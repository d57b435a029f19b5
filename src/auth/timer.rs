//! Expiry-driven logout.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::store::{Action, Store};

/// Owns the single pending session-expiry timer.
///
/// Cheap to clone; clones share the timer slot. Scheduling always replaces
/// the previous timer, so at most one is ever pending.
#[derive(Clone)]
pub struct ExpiryTimer {
    store: Store,
    slot: Arc<Mutex<TimerSlot>>,
}

#[derive(Default)]
struct TimerSlot {
    /// Bumped on every schedule/cancel; a firing timer only acts if its
    /// generation is still current.
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl ExpiryTimer {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            slot: Arc::new(Mutex::new(TimerSlot::default())),
        }
    }

    /// Dispatch `Logout` once `after` has elapsed, replacing any pending
    /// timer. Must be called from within a tokio runtime.
    pub fn schedule_logout(&self, after: Duration) {
        let mut slot = self.slot.lock();
        if let Some(handle) = slot.handle.take() {
            handle.abort();
        }
        slot.generation += 1;
        let generation = slot.generation;

        let store = self.store.clone();
        let shared = Arc::clone(&self.slot);
        slot.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            {
                let mut slot = shared.lock();
                if slot.generation != generation {
                    return;
                }
                slot.handle = None;
            }
            tracing::info!("Session expired, logging out");
            store.dispatch(Action::Logout);
        }));

        tracing::debug!(after_ms = after.as_millis() as u64, "Logout scheduled");
    }

    /// Cancel the pending timer, if any. Idempotent.
    pub fn cancel_logout(&self) {
        let mut slot = self.slot.lock();
        if let Some(handle) = slot.handle.take() {
            handle.abort();
            slot.generation += 1;
            tracing::debug!("Scheduled logout cancelled");
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.slot.lock().handle.is_some()
    }
}
