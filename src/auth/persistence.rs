//! Credential persistence under the `userData` storage key.

use crate::error::StorageError;
use crate::model::{Credential, StoredCredential};
use crate::storage::KeyValueStorage;

pub const USER_DATA_KEY: &str = "userData";

pub fn persist_credential(
    storage: &dyn KeyValueStorage,
    credential: &Credential,
) -> Result<(), StorageError> {
    let stored = StoredCredential::from(credential);
    let json = serde_json::to_string(&stored).map_err(|e| StorageError::Encode {
        key: USER_DATA_KEY.to_string(),
        source: e,
    })?;
    storage.set(USER_DATA_KEY, json)
}

/// Read the persisted credential.
///
/// A value that does not parse is treated as absent and logged; a broken
/// entry must not keep the user from logging in again.
pub fn restore_credential(
    storage: &dyn KeyValueStorage,
) -> Result<Option<Credential>, StorageError> {
    let Some(json) = storage.get(USER_DATA_KEY)? else {
        return Ok(None);
    };

    match serde_json::from_str::<StoredCredential>(&json) {
        Ok(stored) => Ok(Some(Credential::from(stored))),
        Err(err) => {
            tracing::warn!(error = %err, "Ignoring unreadable persisted credential");
            Ok(None)
        }
    }
}

pub fn clear_credential(storage: &dyn KeyValueStorage) -> Result<(), StorageError> {
    storage.remove(USER_DATA_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecureString;
    use crate::storage::MemoryStorage;
    use chrono::{TimeDelta, Utc};

    #[test]
    fn test_persist_then_restore() {
        let storage = MemoryStorage::new();
        let credential = Credential {
            email: "a@b.com".to_string(),
            user_id: "uid".to_string(),
            token: SecureString::new("tok"),
            expires_at: Utc::now() + TimeDelta::hours(1),
        };

        persist_credential(&storage, &credential).unwrap();
        let raw = storage.get(USER_DATA_KEY).unwrap().unwrap();
        assert!(raw.contains("\"_token\":\"tok\""));

        let restored = restore_credential(&storage).unwrap().unwrap();
        assert_eq!(restored, credential);

        clear_credential(&storage).unwrap();
        assert!(restore_credential(&storage).unwrap().is_none());
    }

    #[test]
    fn test_garbage_is_absent() {
        let storage = MemoryStorage::new();
        storage.set(USER_DATA_KEY, "{\"email\":1}".to_string()).unwrap();
        assert!(restore_credential(&storage).unwrap().is_none());
    }
}
