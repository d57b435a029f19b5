//! Secret handling for API keys, passwords and session tokens.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::BackendConfig;

/// Environment variable consulted when `backend.api_key` is not set.
pub const API_KEY_ENV_VAR: &str = "RECIPEBOOK_API_KEY";

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs or storage.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

impl Serialize for SecureString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecureString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecureString)
    }
}

impl BackendConfig {
    /// Resolve the API key from config, then from the environment.
    ///
    /// This is called on-demand and NOT cached, so a key exported after
    /// the config was loaded is still picked up.
    pub fn resolve_api_key(&self) -> Option<SecureString> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(SecureString::new(key.clone()));
            }
        }
        std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .map(SecureString::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_does_not_leak() {
        let secret = SecureString::new("my-secret-token");

        let debug_output = format!("{:?}", secret);
        assert!(!debug_output.contains("my-secret-token"));
        assert!(debug_output.contains("••••••••"));

        let display_output = format!("{}", secret);
        assert!(!display_output.contains("my-secret-token"));

        assert_eq!(secret.expose(), "my-secret-token");
    }

    #[test]
    fn test_secure_string_serializes_as_plain_string() {
        let secret = SecureString::new("abc");
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"abc\"");
        let back: SecureString = serde_json::from_str(&json).unwrap();
        assert_eq!(back, secret);
    }

    #[test]
    fn test_configured_api_key_wins() {
        let backend = BackendConfig {
            api_key: Some("from-config".to_string()),
            ..BackendConfig::default()
        };
        let key = backend.resolve_api_key().unwrap();
        assert_eq!(key.expose(), "from-config");
    }
}
