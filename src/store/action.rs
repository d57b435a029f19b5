use serde::{Deserialize, Serialize};

use crate::config::SecureString;
use crate::model::{Credential, Record};

/// Everything that can happen to the application state.
///
/// Actions carry only the data their consuming reducer or effect needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    SignUpStart {
        email: String,
        password: SecureString,
    },
    LoginStart {
        email: String,
        password: SecureString,
    },
    AuthenticateSuccess {
        credential: Credential,
        /// True for interactive logins, false for a silent restore.
        redirect: bool,
    },
    AuthenticateFail(String),
    Logout,
    AutoLogin,
    /// Nothing to restore. No slice reacts to this.
    AutoLoginSkipped,
    ClearError,
    FetchRecords,
    SetRecords(Vec<Record>),
    StoreRecords,
    AddRecord(Record),
    UpdateRecord {
        index: usize,
        record: Record,
    },
    DeleteRecord(usize),
    RecordsSyncFail(String),
}

/// Fieldless discriminant of [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SignUpStart,
    LoginStart,
    AuthenticateSuccess,
    AuthenticateFail,
    Logout,
    AutoLogin,
    AutoLoginSkipped,
    ClearError,
    FetchRecords,
    SetRecords,
    StoreRecords,
    AddRecord,
    UpdateRecord,
    DeleteRecord,
    RecordsSyncFail,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::SignUpStart { .. } => ActionKind::SignUpStart,
            Action::LoginStart { .. } => ActionKind::LoginStart,
            Action::AuthenticateSuccess { .. } => ActionKind::AuthenticateSuccess,
            Action::AuthenticateFail(_) => ActionKind::AuthenticateFail,
            Action::Logout => ActionKind::Logout,
            Action::AutoLogin => ActionKind::AutoLogin,
            Action::AutoLoginSkipped => ActionKind::AutoLoginSkipped,
            Action::ClearError => ActionKind::ClearError,
            Action::FetchRecords => ActionKind::FetchRecords,
            Action::SetRecords(_) => ActionKind::SetRecords,
            Action::StoreRecords => ActionKind::StoreRecords,
            Action::AddRecord(_) => ActionKind::AddRecord,
            Action::UpdateRecord { .. } => ActionKind::UpdateRecord,
            Action::DeleteRecord(_) => ActionKind::DeleteRecord,
            Action::RecordsSyncFail(_) => ActionKind::RecordsSyncFail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let action = Action::AuthenticateFail("nope".to_string());
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "AuthenticateFail");
        assert_eq!(json["payload"], "nope");

        let json = serde_json::to_value(Action::Logout).unwrap();
        assert_eq!(json["type"], "Logout");
    }

    #[test]
    fn test_password_masked_in_debug() {
        let action = Action::LoginStart {
            email: "a@b.com".to_string(),
            password: SecureString::new("hunter2"),
        };
        assert!(!format!("{:?}", action).contains("hunter2"));
        assert_eq!(action.kind(), ActionKind::LoginStart);
    }
}
