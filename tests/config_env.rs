//! Environment fallback for the API key.
//!
//! Kept in its own test binary: it mutates process environment.

use recipebook::config::{BackendConfig, Config, ConfigError, API_KEY_ENV_VAR};

#[test]
fn test_api_key_falls_back_to_environment() {
    let config = Config {
        backend: BackendConfig {
            project_url: "https://book.example.com".to_string(),
            ..BackendConfig::default()
        },
        ..Config::default()
    };

    std::env::remove_var(API_KEY_ENV_VAR);
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains(API_KEY_ENV_VAR));

    std::env::set_var(API_KEY_ENV_VAR, "env-key");
    config.validate().unwrap();
    assert_eq!(
        config.backend.resolve_api_key().unwrap().expose(),
        "env-key"
    );

    // An empty configured key does not shadow the environment.
    let empty = BackendConfig {
        api_key: Some(String::new()),
        ..config.backend.clone()
    };
    assert_eq!(empty.resolve_api_key().unwrap().expose(), "env-key");

    std::env::remove_var(API_KEY_ENV_VAR);
}
