//! Unidirectional state store.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducers ──→ AppState ──→ Subscribers
//!    ↑                        │
//!    │                   action taps
//!    │                        ↓
//!    └──────────────── Effects (async I/O)
//! ```
//!
//! - **AppState**: immutable snapshot of every slice
//! - **Action**: user intent or completed async result
//! - **Reducer**: pure function that transforms a slice based on actions

mod action;
mod dispatch;
mod reducer;
mod state;

pub use action::{Action, ActionKind};
pub use dispatch::{ActionStream, Store, Subscription};
pub use reducer::{replace_if_changed, Reducer, Slice};
pub use state::AppState;
