//! Standing effect tasks and their concurrency policies.

use std::sync::Arc;

use tokio::task::{JoinError, JoinHandle, JoinSet};

use crate::effects::traits::{ConcurrencyPolicy, Effect};
use crate::shutdown::ShutdownHandle;
use crate::store::{Action, ActionStream, Store};

/// Owns one standing task per registered effect.
///
/// Each task reads its own action tap, starts procedures according to the
/// effect's [`ConcurrencyPolicy`] and dispatches their results.
pub struct EffectRunner {
    store: Store,
    shutdown: ShutdownHandle,
    loops: Vec<(&'static str, JoinHandle<()>)>,
}

impl EffectRunner {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            shutdown: ShutdownHandle::new(),
            loops: Vec::new(),
        }
    }

    /// Start the standing task for `effect`.
    ///
    /// The action tap is opened before this returns, so every action
    /// dispatched afterwards reaches the effect. Must be called from
    /// within a tokio runtime.
    pub fn register(&mut self, effect: Arc<dyn Effect>) {
        let name = effect.name();
        let actions = self.store.actions();
        let effect_loop = EffectLoop {
            effect,
            store: self.store.clone(),
            generation: 0,
            in_flight: JoinSet::new(),
        };
        let handle = tokio::spawn(effect_loop.run(actions, self.shutdown.clone()));
        tracing::debug!(effect = name, "Effect registered");
        self.loops.push((name, handle));
    }

    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Stop every effect task.
    ///
    /// Triggers already queued are still handled and in-flight procedures
    /// are awaited, with their results dispatched, before this resolves.
    pub async fn shutdown(self) {
        self.shutdown.signal();
        for (name, handle) in self.loops {
            if let Err(err) = handle.await {
                tracing::error!(effect = name, error = %err, "Effect task ended abnormally");
            }
        }
    }
}

struct EffectLoop {
    effect: Arc<dyn Effect>,
    store: Store,
    /// Bumped on every accepted trigger under `Switch`.
    generation: u64,
    in_flight: JoinSet<(u64, Vec<Action>)>,
}

impl EffectLoop {
    async fn run(mut self, mut actions: ActionStream, shutdown: ShutdownHandle) {
        loop {
            // Triggers are polled before completions: a trigger dispatched
            // before a completion is observed always supersedes it.
            tokio::select! {
                biased;
                action = actions.recv() => match action {
                    Some(action) => self.on_trigger(action),
                    None => break,
                },
                Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    self.on_complete(joined);
                }
                _ = shutdown.wait() => break,
            }
        }

        while let Ok(action) = actions.try_recv() {
            self.on_trigger(action);
        }
        while let Some(joined) = self.in_flight.join_next().await {
            self.on_complete(joined);
        }
        tracing::debug!(effect = self.effect.name(), "Effect stopped");
    }

    fn on_trigger(&mut self, action: Action) {
        if !self.effect.accepts(&action) {
            return;
        }
        let name = self.effect.name();

        match self.effect.policy() {
            ConcurrencyPolicy::Switch => {
                if !self.in_flight.is_empty() {
                    tracing::debug!(effect = name, "Superseding in-flight procedure");
                    self.in_flight.abort_all();
                }
                self.generation += 1;
            }
            ConcurrencyPolicy::SuppressOverlap => {
                if !self.in_flight.is_empty() {
                    tracing::debug!(
                        effect = name,
                        kind = ?action.kind(),
                        "Trigger dropped, procedure already in flight"
                    );
                    return;
                }
            }
            ConcurrencyPolicy::Unbounded => {}
        }

        tracing::debug!(effect = name, kind = ?action.kind(), "Effect triggered");
        let effect = Arc::clone(&self.effect);
        let generation = self.generation;
        self.in_flight
            .spawn(async move { (generation, effect.run(action).await) });
    }

    fn on_complete(&mut self, joined: Result<(u64, Vec<Action>), JoinError>) {
        let name = self.effect.name();
        match joined {
            Ok((generation, results)) => {
                if self.effect.policy() == ConcurrencyPolicy::Switch
                    && generation != self.generation
                {
                    tracing::debug!(effect = name, "Discarding superseded result");
                    return;
                }
                self.effect.commit(&results);
                for action in results {
                    self.store.dispatch(action);
                }
            }
            Err(err) if err.is_cancelled() => {
                tracing::trace!(effect = name, "Procedure cancelled");
            }
            Err(err) => {
                tracing::error!(effect = name, error = %err, "Effect procedure panicked");
            }
        }
    }
}
