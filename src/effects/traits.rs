//! Core trait for effects.

use async_trait::async_trait;

use crate::store::Action;

/// How overlapping triggers of the same effect are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyPolicy {
    /// A new trigger makes the pending procedure's result inert; only the
    /// newest procedure may dispatch.
    Switch,
    /// Triggers arriving while a procedure is in flight are dropped before
    /// any I/O starts.
    SuppressOverlap,
    /// Every trigger starts an independent procedure.
    Unbounded,
}

/// A standing asynchronous reaction to actions.
///
/// Effects are the only place where I/O happens. They never touch state
/// directly; whatever they return is dispatched back into the store.
#[async_trait]
pub trait Effect: Send + Sync {
    /// Returns the name of this effect for logging.
    fn name(&self) -> &'static str;

    fn policy(&self) -> ConcurrencyPolicy;

    /// Whether `action` triggers this effect.
    fn accepts(&self, action: &Action) -> bool;

    /// Run the procedure for one trigger.
    ///
    /// Failures must be converted into actions; the returned actions are
    /// dispatched in order unless the policy discards the result.
    async fn run(&self, action: Action) -> Vec<Action>;

    /// Apply local side effects for results that are about to be dispatched.
    ///
    /// Runs on the effect's own task after the policy has accepted the
    /// results; a superseded procedure never reaches it.
    fn commit(&self, _results: &[Action]) {}
}
