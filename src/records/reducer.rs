use std::sync::Arc;

use crate::records::state::RecordsState;
use crate::store::{replace_if_changed, Action, Reducer};

pub struct RecordsReducer;

impl Reducer for RecordsReducer {
    type State = RecordsState;

    fn reduce(state: Arc<Self::State>, action: &Action) -> Arc<Self::State> {
        let next = match action {
            Action::SetRecords(records) => RecordsState {
                records: records.clone(),
                sync_error: None,
            },
            Action::AddRecord(record) => {
                let mut next = (*state).clone();
                next.records.push(record.clone());
                next
            }
            Action::UpdateRecord { index, record } => {
                if *index >= state.records.len() {
                    return state;
                }
                let mut next = (*state).clone();
                next.records[*index] = record.clone();
                next
            }
            Action::DeleteRecord(index) => {
                if *index >= state.records.len() {
                    return state;
                }
                let mut next = (*state).clone();
                next.records.remove(*index);
                next
            }
            Action::RecordsSyncFail(message) => RecordsState {
                sync_error: Some(message.clone()),
                ..(*state).clone()
            },
            Action::SignUpStart { .. }
            | Action::LoginStart { .. }
            | Action::AuthenticateSuccess { .. }
            | Action::AuthenticateFail(_)
            | Action::Logout
            | Action::AutoLogin
            | Action::AutoLoginSkipped
            | Action::ClearError
            | Action::FetchRecords
            | Action::StoreRecords => return state,
        };

        replace_if_changed(state, next)
    }
}
