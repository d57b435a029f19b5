use std::sync::Arc;

use crate::auth::state::AuthState;
use crate::store::{replace_if_changed, Action, Reducer};

pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;

    fn reduce(state: Arc<Self::State>, action: &Action) -> Arc<Self::State> {
        let next = match action {
            Action::SignUpStart { .. } | Action::LoginStart { .. } => AuthState {
                loading: true,
                auth_error: None,
                ..(*state).clone()
            },
            Action::AuthenticateSuccess { credential, .. } => AuthState {
                user: Some(credential.clone()),
                loading: false,
                auth_error: None,
            },
            Action::AuthenticateFail(message) => AuthState {
                loading: false,
                auth_error: Some(message.clone()),
                ..(*state).clone()
            },
            Action::Logout => AuthState {
                user: None,
                loading: false,
                auth_error: None,
            },
            Action::ClearError => AuthState {
                auth_error: None,
                ..(*state).clone()
            },
            // AutoLogin is handled entirely by its effect.
            Action::AutoLogin
            | Action::AutoLoginSkipped
            | Action::FetchRecords
            | Action::SetRecords(_)
            | Action::StoreRecords
            | Action::AddRecord(_)
            | Action::UpdateRecord { .. }
            | Action::DeleteRecord(_)
            | Action::RecordsSyncFail(_) => return state,
        };

        replace_if_changed(state, next)
    }
}
