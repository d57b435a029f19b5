//! Effect orchestration.
//!
//! Effects observe the action stream, perform I/O and dispatch follow-up
//! actions. Each effect declares how overlapping triggers are resolved:
//!
//! - **Switch**: newest trigger wins, older results are inert
//! - **SuppressOverlap**: triggers are dropped while one is in flight
//! - **Unbounded**: every trigger runs independently

mod runner;
mod traits;

pub use runner::EffectRunner;
pub use traits::{ConcurrencyPolicy, Effect};
