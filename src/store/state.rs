use std::sync::Arc;

use crate::auth::{AuthReducer, AuthState};
use crate::records::{RecordsReducer, RecordsState};
use crate::store::action::Action;
use crate::store::reducer::Reducer;

/// Snapshot of every state slice. Cloning is O(1).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub auth: Arc<AuthState>,
    pub records: Arc<RecordsState>,
}

impl AppState {
    /// Run every reducer, in slice order, against this snapshot.
    pub fn apply(&self, action: &Action) -> AppState {
        AppState {
            auth: AuthReducer::reduce(Arc::clone(&self.auth), action),
            records: RecordsReducer::reduce(Arc::clone(&self.records), action),
        }
    }
}
