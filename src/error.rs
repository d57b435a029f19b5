//! Error taxonomy for the state core.
//!
//! Effects never surface these as failures of their own: authentication
//! errors are turned into `Action::AuthenticateFail` carrying the
//! user-visible message, storage errors are logged.

use std::path::PathBuf;

use thiserror::Error;

use crate::api::HttpError;

/// Classified backend authentication failure.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("This email already exists!")]
    EmailExists,

    #[error("This email does not exist!")]
    EmailNotFound,

    #[error("This password is incorrect!")]
    InvalidPassword,

    #[error("An unknown error occurred!")]
    Unknown,
}

impl AuthError {
    /// Map a backend error code to its classification.
    ///
    /// The identity toolkit sometimes appends detail after `" : "`
    /// (e.g. `"TOO_MANY_ATTEMPTS_TRY_LATER : ..."`); only the code counts.
    pub fn from_code(code: &str) -> Self {
        let code = code.split(" : ").next().unwrap_or_default().trim();
        match code {
            "EMAIL_EXISTS" => AuthError::EmailExists,
            "EMAIL_NOT_FOUND" => AuthError::EmailNotFound,
            "INVALID_PASSWORD" => AuthError::InvalidPassword,
            _ => AuthError::Unknown,
        }
    }

    /// Classify a failed auth request. Anything without a well-formed
    /// `{ error: { message } }` body is unknown.
    pub fn classify(err: &HttpError) -> Self {
        match err.backend_message() {
            Some(code) => Self::from_code(code),
            None => AuthError::Unknown,
        }
    }
}

/// Errors raised by durable key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read storage file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write storage file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
