//! Record list synchronisation with the realtime database.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::api::RecordsApi;
use crate::config::SecureString;
use crate::effects::{ConcurrencyPolicy, Effect};
use crate::store::{Action, Store};

const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Token of the credential held in the store right now.
///
/// Read from a fresh snapshot on every call so a token never outlives
/// the logout that removed it.
fn current_token(store: &Store) -> Option<SecureString> {
    let state = store.get_state();
    let user = state.auth.user.as_ref()?;
    user.token_if_valid(Utc::now()).cloned()
}

pub struct FetchRecordsEffect {
    store: Store,
    api: Arc<RecordsApi>,
}

impl FetchRecordsEffect {
    pub fn new(store: Store, api: Arc<RecordsApi>) -> Self {
        Self { store, api }
    }
}

#[async_trait]
impl Effect for FetchRecordsEffect {
    fn name(&self) -> &'static str {
        "fetch_records"
    }

    fn policy(&self) -> ConcurrencyPolicy {
        ConcurrencyPolicy::Unbounded
    }

    fn accepts(&self, action: &Action) -> bool {
        matches!(action, Action::FetchRecords)
    }

    async fn run(&self, _action: Action) -> Vec<Action> {
        let Some(token) = current_token(&self.store) else {
            tracing::warn!("Fetch requested without a valid session");
            return vec![Action::RecordsSyncFail(NOT_AUTHENTICATED.to_string())];
        };

        match self.api.fetch(&token).await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Records fetched");
                vec![Action::SetRecords(records)]
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to fetch records");
                vec![Action::RecordsSyncFail(format!(
                    "Failed to fetch records: {}",
                    err
                ))]
            }
        }
    }
}

/// Writes the whole list back. A save already running swallows further
/// save requests.
pub struct StoreRecordsEffect {
    store: Store,
    api: Arc<RecordsApi>,
}

impl StoreRecordsEffect {
    pub fn new(store: Store, api: Arc<RecordsApi>) -> Self {
        Self { store, api }
    }
}

#[async_trait]
impl Effect for StoreRecordsEffect {
    fn name(&self) -> &'static str {
        "store_records"
    }

    fn policy(&self) -> ConcurrencyPolicy {
        ConcurrencyPolicy::SuppressOverlap
    }

    fn accepts(&self, action: &Action) -> bool {
        matches!(action, Action::StoreRecords)
    }

    async fn run(&self, _action: Action) -> Vec<Action> {
        let Some(token) = current_token(&self.store) else {
            tracing::warn!("Save requested without a valid session");
            return vec![Action::RecordsSyncFail(NOT_AUTHENTICATED.to_string())];
        };

        let records = self.store.get_state().records.records.clone();
        match self.api.store(&token, &records).await {
            Ok(()) => {
                tracing::debug!(count = records.len(), "Records stored");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to store records");
                vec![Action::RecordsSyncFail(format!(
                    "Failed to store records: {}",
                    err
                ))]
            }
        }
    }
}
