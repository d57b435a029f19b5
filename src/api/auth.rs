//! Identity toolkit calls (sign-up / sign-in).

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::api::endpoints::Endpoints;
use crate::api::transport::{HttpError, HttpRequest, HttpTransport};
use crate::config::SecureString;

/// Which identity endpoint an authentication attempt targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignUp,
    Login,
}

/// Successful identity toolkit response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseData {
    #[serde(default)]
    pub kind: Option<String>,
    pub id_token: String,
    pub email: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Lifetime of `id_token` in seconds, as a decimal string.
    pub expires_in: String,
    pub local_id: String,
    #[serde(default)]
    pub registered: Option<bool>,
}

impl AuthResponseData {
    pub fn expires_in_seconds(&self) -> Result<u64, HttpError> {
        self.expires_in.trim().parse().map_err(|_| {
            HttpError::Decode(format!("expiresIn is not a number: '{}'", self.expires_in))
        })
    }
}

pub struct AuthApi {
    transport: Arc<dyn HttpTransport>,
    endpoints: Endpoints,
}

impl AuthApi {
    pub fn new(transport: Arc<dyn HttpTransport>, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub async fn authenticate(
        &self,
        mode: AuthMode,
        email: &str,
        password: &SecureString,
    ) -> Result<AuthResponseData, HttpError> {
        let url = match mode {
            AuthMode::SignUp => &self.endpoints.sign_up_url,
            AuthMode::Login => &self.endpoints.sign_in_url,
        };

        let request = HttpRequest::new(Method::POST, url.as_str()).json(json!({
            "email": email,
            "password": password.expose(),
            "returnSecureToken": true,
        }));

        let response = self.transport.send(request).await?;
        serde_json::from_value(response.body).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_in_parsing() {
        let mut data: AuthResponseData = serde_json::from_value(json!({
            "idToken": "tok",
            "email": "a@b.com",
            "refreshToken": "r",
            "expiresIn": "3600",
            "localId": "uid"
        }))
        .unwrap();
        assert_eq!(data.expires_in_seconds().unwrap(), 3600);
        assert!(data.registered.is_none());

        data.expires_in = "soon".to_string();
        assert!(matches!(
            data.expires_in_seconds(),
            Err(HttpError::Decode(_))
        ));
    }
}
