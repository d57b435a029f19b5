//! The single writable owner of application state.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex};
use tokio::sync::mpsc;

use crate::store::action::Action;
use crate::store::state::AppState;

type Listener = Arc<dyn Fn(&AppState) + Send + Sync>;

/// Receiver half of an action tap. Sees every action after reducers and
/// subscribers have processed it.
pub type ActionStream = mpsc::UnboundedReceiver<Action>;

/// Handle to the state store.
///
/// Cheap to clone; every clone refers to the same state. The lock is
/// never held while listeners run.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Mutex<StoreInner>>,
    /// Held for a whole dispatch; re-entrant so listeners can dispatch.
    gate: Arc<ReentrantMutex<()>>,
}

struct StoreInner {
    state: AppState,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
    taps: Vec<mpsc::UnboundedSender<Action>>,
    /// Actions waiting for the dispatch loop already in progress.
    pending: VecDeque<Action>,
    dispatching: bool,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                state,
                listeners: Vec::new(),
                next_listener_id: 0,
                taps: Vec::new(),
                pending: VecDeque::new(),
                dispatching: false,
            })),
            gate: Arc::new(ReentrantMutex::new(())),
        }
    }

    /// Current snapshot.
    pub fn get_state(&self) -> AppState {
        self.inner.lock().state.clone()
    }

    /// Apply `action` to the state, notify subscribers, then forward it to
    /// every action tap.
    ///
    /// Unless called from a listener, the action has been applied and its
    /// listeners have run when this returns. A call from another thread
    /// while a dispatch is running blocks until that dispatch finishes. A
    /// call from a listener is queued and applied by the running loop, in
    /// call order, before the outer dispatch returns.
    ///
    /// Listeners must not wait on another thread that dispatches.
    pub fn dispatch(&self, action: Action) {
        let _gate = self.gate.lock();
        {
            let mut inner = self.inner.lock();
            inner.pending.push_back(action);
            if inner.dispatching {
                return;
            }
            inner.dispatching = true;
        }

        // A panicking listener must not wedge the store.
        let _reset = scopeguard::guard_on_unwind(Arc::clone(&self.inner), |inner| {
            inner.lock().dispatching = false;
        });

        loop {
            let (action, state, listeners) = {
                let mut inner = self.inner.lock();
                let Some(action) = inner.pending.pop_front() else {
                    inner.dispatching = false;
                    return;
                };
                let next = inner.state.apply(&action);
                inner.state = next.clone();
                let listeners: Vec<Listener> = inner
                    .listeners
                    .iter()
                    .map(|(_, listener)| Arc::clone(listener))
                    .collect();
                (action, next, listeners)
            };

            tracing::trace!(kind = ?action.kind(), "Action applied");

            for listener in &listeners {
                listener(&state);
            }

            let mut inner = self.inner.lock();
            inner.taps.retain(|tap| tap.send(action.clone()).is_ok());
        }
    }

    /// Register a listener called with every new state.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AppState) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Arc::new(listener)));

        Subscription {
            store: Arc::downgrade(&self.inner),
            id,
            active: AtomicBool::new(true),
        }
    }

    /// Open a new action tap.
    ///
    /// The tap is dropped from the store once its receiver is dropped.
    pub fn actions(&self) -> ActionStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.lock().taps.push(tx);
        rx
    }

    /// Wait until the state satisfies `predicate` and return that state.
    ///
    /// Resolves immediately if the current state already matches.
    pub async fn wait_for<F>(&self, mut predicate: F) -> AppState
    where
        F: FnMut(&AppState) -> bool,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscription = self.subscribe(move |state| {
            let _ = tx.send(state.clone());
        });

        let mut state = self.get_state();
        while !predicate(&state) {
            match rx.recv().await {
                Some(next) => state = next,
                None => break,
            }
        }

        subscription.unsubscribe();
        state
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Deregistration capability returned by [`Store::subscribe`].
///
/// Dropping it does not unsubscribe.
pub struct Subscription {
    store: Weak<Mutex<StoreInner>>,
    id: u64,
    active: AtomicBool,
}

impl Subscription {
    /// Remove the listener. Calling this more than once is a no-op.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(store) = self.store.upgrade() {
            store.lock().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
