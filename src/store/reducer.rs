//! Reducer trait for the state slices.

use std::sync::Arc;

use super::action::Action;

/// Marker trait for state slices.
///
/// Slices should be:
/// - Immutable (replaced, never edited in place)
/// - Comparable (PartialEq for detecting changes)
/// - Default-constructible (initial state at process start)
pub trait Slice: Clone + PartialEq + Default + Send + Sync + 'static {}

/// Reducer transforms a slice based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Action) -> State. Actions the
/// slice does not care about return the input `Arc` untouched, so
/// `Arc::ptr_eq` is a valid change check downstream.
pub trait Reducer {
    /// The slice this reducer operates on.
    type State: Slice;

    fn reduce(state: Arc<Self::State>, action: &Action) -> Arc<Self::State>;
}

/// Keep `state` if `next` is equal to it, otherwise allocate `next`.
pub fn replace_if_changed<S: Slice>(state: Arc<S>, next: S) -> Arc<S> {
    if *state == next {
        state
    } else {
        Arc::new(next)
    }
}
