use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SecureString;

/// An authenticated session.
///
/// Replaced wholesale on re-authentication; never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub email: String,
    pub user_id: String,
    pub token: SecureString,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// The token, as long as the session has not expired at `now`.
    pub fn token_if_valid(&self, now: DateTime<Utc>) -> Option<&SecureString> {
        if self.token.is_empty() || now >= self.expires_at {
            return None;
        }
        Some(&self.token)
    }

    /// Time left until expiry. Zero or negative once expired.
    pub fn remaining(&self, now: DateTime<Utc>) -> chrono::TimeDelta {
        self.expires_at - now
    }
}

/// On-disk layout of a persisted credential under the `userData` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub email: String,
    pub id: String,
    #[serde(rename = "_token")]
    pub token: String,
    #[serde(rename = "_tokenExpirationDate")]
    pub token_expiration_date: DateTime<Utc>,
}

impl From<&Credential> for StoredCredential {
    fn from(credential: &Credential) -> Self {
        Self {
            email: credential.email.clone(),
            id: credential.user_id.clone(),
            token: credential.token.expose().to_string(),
            token_expiration_date: credential.expires_at,
        }
    }
}

impl From<StoredCredential> for Credential {
    fn from(stored: StoredCredential) -> Self {
        Self {
            email: stored.email,
            user_id: stored.id,
            token: SecureString::new(stored.token),
            expires_at: stored.token_expiration_date,
        }
    }
}
