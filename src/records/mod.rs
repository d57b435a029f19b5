//! Records slice and its backend synchronisation effects.

mod effects;
mod reducer;
mod state;

pub use effects::{FetchRecordsEffect, StoreRecordsEffect};
pub use reducer::RecordsReducer;
pub use state::RecordsState;
