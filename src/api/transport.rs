//! HTTP transport seam.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;

/// A request handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Query parameters appended to `url`.
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Decoded JSON body; `Value::Null` for an empty body.
    pub body: Value,
}

/// Transport-level failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    /// The backend answered with a non-success status.
    #[error("Backend returned status {status}")]
    Status { status: u16, body: Option<Value> },

    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl HttpError {
    /// The backend's `{ "error": { "message": ... } }` code, if present.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            HttpError::Status {
                body: Some(body), ..
            } => body.pointer("/error/message").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// Capability for sending requests to the remote backend.
///
/// Injected into the API clients so tests can script responses.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_message_extraction() {
        let err = HttpError::Status {
            status: 400,
            body: Some(json!({"error": {"message": "EMAIL_EXISTS"}})),
        };
        assert_eq!(err.backend_message(), Some("EMAIL_EXISTS"));

        let err = HttpError::Status {
            status: 400,
            body: Some(json!({"error": {"message": 42}})),
        };
        assert_eq!(err.backend_message(), None);
        assert_eq!(HttpError::Decode("x".into()).backend_message(), None);
    }

    #[test]
    fn test_request_builder() {
        let req = HttpRequest::new(Method::GET, "https://db.example.com/recipes.json")
            .query("auth", "tok");
        assert_eq!(req.query_param("auth"), Some("tok"));
        assert_eq!(req.query_param("key"), None);
        assert!(req.body.is_none());
    }
}
