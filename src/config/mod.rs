//! Configuration loading for the recipe-book client.

mod credentials;
mod loader;
mod types;

pub use credentials::{SecureString, API_KEY_ENV_VAR};
pub use loader::ConfigError;
pub use types::{BackendConfig, Config, HttpConfig, StorageConfig};
