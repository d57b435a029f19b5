use crate::config::{BackendConfig, SecureString};

/// Resolved backend URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub sign_up_url: String,
    pub sign_in_url: String,
    pub records_url: String,
}

impl Endpoints {
    /// Build the endpoint set from backend config and a resolved API key.
    pub fn from_config(backend: &BackendConfig, api_key: &SecureString) -> Self {
        let auth_base = backend.auth_base_url.trim_end_matches('/');
        let project = backend.project_url.trim_end_matches('/');
        let records = backend.records_endpoint.trim_start_matches('/');

        Self {
            sign_up_url: format!("{}/accounts:signUp?key={}", auth_base, api_key.expose()),
            sign_in_url: format!(
                "{}/accounts:signInWithPassword?key={}",
                auth_base,
                api_key.expose()
            ),
            records_url: format!("{}/{}", project, records),
        }
    }

    /// Endpoints rooted at a single base URL. Used against local mock servers.
    pub fn for_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            sign_up_url: format!("{}/v1/accounts:signUp", base),
            sign_in_url: format!("{}/v1/accounts:signInWithPassword", base),
            records_url: format!("{}/recipes.json", base),
        }
    }
}
