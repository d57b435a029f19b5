//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use parking_lot::Mutex;
use recipebook::api::{Endpoints, HttpError, HttpRequest, HttpResponse, HttpTransport};
use recipebook::app::{App, AppDeps};
use recipebook::config::SecureString;
use recipebook::model::Credential;
use recipebook::navigation::{Navigator, Route};
use recipebook::storage::{KeyValueStorage, MemoryStorage};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_BASE_URL: &str = "http://backend.test";

/// One scripted transport outcome, delivered after `delay`.
pub struct Scripted {
    pub delay: Duration,
    pub result: Result<HttpResponse, HttpError>,
}

impl Scripted {
    pub fn ok(body: Value) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(HttpResponse { status: 200, body }),
        }
    }

    /// Identity toolkit style failure: `{ "error": { "message": code } }`.
    pub fn backend_error(status: u16, code: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(HttpError::Status {
                status,
                body: Some(json!({ "error": { "code": status, "message": code } })),
            }),
        }
    }

    pub fn transport_error(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(HttpError::Transport(message.to_string())),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A successful sign-in/sign-up body.
pub fn auth_body(email: &str, token: &str, expires_in: &str) -> Value {
    json!({
        "kind": "identitytoolkit#VerifyPasswordResponse",
        "idToken": token,
        "email": email,
        "refreshToken": "refresh",
        "expiresIn": expires_in,
        "localId": format!("uid-{}", email),
        "registered": true,
    })
}

type Responder = dyn Fn(&HttpRequest) -> Scripted + Send + Sync;

/// In-process `HttpTransport` answering from a closure and recording every
/// request it saw.
pub struct ScriptedTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&HttpRequest) -> Scripted + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Answer every request with the same body.
    pub fn always_ok(body: Value) -> Arc<Self> {
        Self::new(move |_| Scripted::ok(body.clone()))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let scripted = (self.responder)(&request);
        self.requests.lock().push(request);
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result
    }
}

/// Email field of a JSON request body, if any.
pub fn request_email(request: &HttpRequest) -> Option<String> {
    request
        .body
        .as_ref()
        .and_then(|body| body.get("email"))
        .and_then(Value::as_str)
        .map(String::from)
}

/// Navigator that remembers every requested route.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }
}

/// A started app plus handles on its fakes.
pub struct TestApp {
    pub app: App,
    pub transport: Arc<ScriptedTransport>,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn start_app(transport: Arc<ScriptedTransport>) -> TestApp {
    start_app_with_storage(transport, Arc::new(MemoryStorage::new()))
}

pub fn start_app_with_storage(
    transport: Arc<ScriptedTransport>,
    storage: Arc<MemoryStorage>,
) -> TestApp {
    let navigator = Arc::new(RecordingNavigator::default());
    let app = App::start(AppDeps {
        transport: transport.clone(),
        storage: storage.clone(),
        navigator: navigator.clone(),
        endpoints: Endpoints::for_base_url(TEST_BASE_URL),
    });
    TestApp {
        app,
        transport,
        storage,
        navigator,
    }
}

/// Credential expiring `lifetime` from now.
pub fn credential(email: &str, token: &str, lifetime: TimeDelta) -> Credential {
    Credential {
        email: email.to_string(),
        user_id: format!("uid-{}", email),
        token: SecureString::new(token),
        expires_at: Utc::now() + lifetime,
    }
}
