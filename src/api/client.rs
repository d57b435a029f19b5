use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::api::transport::{HttpError, HttpRequest, HttpResponse, HttpTransport};
use crate::config::HttpConfig;

/// `HttpTransport` backed by a shared `reqwest::Client`.
///
/// Only a connect timeout is applied; requests themselves are not
/// time-boxed by the client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, HttpError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()
            .map_err(|e| HttpError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut url = Url::parse(&request.url)
            .map_err(|e| HttpError::Transport(format!("Invalid URL '{}': {}", request.url, e)))?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.query {
                pairs.append_pair(name, value);
            }
        }

        tracing::debug!(method = %request.method, path = %url.path(), "Sending request");

        let mut builder = self.client.request(request.method, url);
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Backend returned error status");
            return Err(HttpError::Status {
                status: status.as_u16(),
                body: serde_json::from_slice(&bytes).ok(),
            });
        }

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| HttpError::Decode(e.to_string()))?
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}
