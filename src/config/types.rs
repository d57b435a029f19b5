use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote backend (identity toolkit + realtime database) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Web API key appended to the identity toolkit URLs.
    /// Falls back to the `RECIPEBOOK_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the identity toolkit (e.g., "https://identitytoolkit.googleapis.com/v1").
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,
    /// Realtime database root (e.g., "https://my-project.firebaseio.com").
    #[serde(default)]
    pub project_url: String,
    /// Path of the records collection under `project_url`.
    #[serde(default = "default_records_endpoint")]
    pub records_endpoint: String,
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Durable key-value storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file. Defaults to `<data_dir>/recipebook/storage.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_auth_base_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_records_endpoint() -> String {
    "recipes.json".to_string()
}

fn default_connect_timeout() -> u32 {
    5
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            auth_base_url: default_auth_base_url(),
            project_url: String::new(),
            records_endpoint: default_records_endpoint(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl StorageConfig {
    /// Resolve the storage file location.
    pub fn resolve_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("recipebook")
                .join("storage.json"),
        }
    }
}
