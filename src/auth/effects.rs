//! Authentication side effects.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};

use crate::api::{AuthApi, AuthMode, AuthResponseData, HttpError};
use crate::auth::persistence::{clear_credential, persist_credential, restore_credential};
use crate::auth::timer::ExpiryTimer;
use crate::config::SecureString;
use crate::effects::{ConcurrencyPolicy, Effect};
use crate::error::AuthError;
use crate::model::Credential;
use crate::navigation::{Navigator, Route};
use crate::storage::KeyValueStorage;
use crate::store::Action;

/// Sign-up or login against the identity toolkit.
///
/// One instance per mode; rapid re-submits switch to the newest attempt.
/// The credential is persisted and the expiry timer armed only once the
/// result is accepted, so a superseded attempt leaves nothing behind.
pub struct AuthenticateEffect {
    mode: AuthMode,
    api: Arc<AuthApi>,
    storage: Arc<dyn KeyValueStorage>,
    timer: ExpiryTimer,
}

impl AuthenticateEffect {
    pub fn new(
        mode: AuthMode,
        api: Arc<AuthApi>,
        storage: Arc<dyn KeyValueStorage>,
        timer: ExpiryTimer,
    ) -> Self {
        Self {
            mode,
            api,
            storage,
            timer,
        }
    }

    fn on_success(&self, data: AuthResponseData) -> Result<Action, HttpError> {
        let expires_in = data.expires_in_seconds()?;
        let lifetime = i64::try_from(expires_in)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| HttpError::Decode(format!("expiresIn out of range: {}", expires_in)))?;
        let credential = Credential {
            email: data.email,
            user_id: data.local_id,
            token: SecureString::new(data.id_token),
            expires_at: Utc::now() + lifetime,
        };

        Ok(Action::AuthenticateSuccess {
            credential,
            redirect: true,
        })
    }
}

#[async_trait]
impl Effect for AuthenticateEffect {
    fn name(&self) -> &'static str {
        match self.mode {
            AuthMode::SignUp => "auth_sign_up",
            AuthMode::Login => "auth_login",
        }
    }

    fn policy(&self) -> ConcurrencyPolicy {
        ConcurrencyPolicy::Switch
    }

    fn accepts(&self, action: &Action) -> bool {
        match self.mode {
            AuthMode::SignUp => matches!(action, Action::SignUpStart { .. }),
            AuthMode::Login => matches!(action, Action::LoginStart { .. }),
        }
    }

    async fn run(&self, action: Action) -> Vec<Action> {
        let (email, password) = match action {
            Action::SignUpStart { email, password } | Action::LoginStart { email, password } => {
                (email, password)
            }
            _ => return Vec::new(),
        };

        let result = self
            .api
            .authenticate(self.mode, &email, &password)
            .await
            .and_then(|data| self.on_success(data));

        match result {
            Ok(action) => {
                tracing::info!(email = %email, "Authenticated");
                vec![action]
            }
            Err(err) => {
                let classified = AuthError::classify(&err);
                tracing::warn!(email = %email, error = %err, ?classified, "Authentication failed");
                vec![Action::AuthenticateFail(classified.to_string())]
            }
        }
    }

    fn commit(&self, results: &[Action]) {
        for action in results {
            let Action::AuthenticateSuccess { credential, .. } = action else {
                continue;
            };
            if let Err(err) = persist_credential(self.storage.as_ref(), credential) {
                tracing::warn!(error = %err, "Failed to persist credential");
            }
            let remaining = credential.remaining(Utc::now()).to_std().unwrap_or(Duration::ZERO);
            self.timer.schedule_logout(remaining);
        }
    }
}

/// Navigates home after an interactive login.
pub struct AuthRedirectEffect {
    navigator: Arc<dyn Navigator>,
}

impl AuthRedirectEffect {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }
}

#[async_trait]
impl Effect for AuthRedirectEffect {
    fn name(&self) -> &'static str {
        "auth_redirect"
    }

    fn policy(&self) -> ConcurrencyPolicy {
        ConcurrencyPolicy::Unbounded
    }

    fn accepts(&self, action: &Action) -> bool {
        matches!(action, Action::AuthenticateSuccess { redirect: true, .. })
    }

    async fn run(&self, _action: Action) -> Vec<Action> {
        self.navigator.navigate(Route::Home);
        Vec::new()
    }
}

/// Restores a persisted session at startup.
pub struct AutoLoginEffect {
    storage: Arc<dyn KeyValueStorage>,
    timer: ExpiryTimer,
}

impl AutoLoginEffect {
    pub fn new(storage: Arc<dyn KeyValueStorage>, timer: ExpiryTimer) -> Self {
        Self { storage, timer }
    }
}

#[async_trait]
impl Effect for AutoLoginEffect {
    fn name(&self) -> &'static str {
        "auto_login"
    }

    fn policy(&self) -> ConcurrencyPolicy {
        ConcurrencyPolicy::Unbounded
    }

    fn accepts(&self, action: &Action) -> bool {
        matches!(action, Action::AutoLogin)
    }

    async fn run(&self, _action: Action) -> Vec<Action> {
        let credential = match restore_credential(self.storage.as_ref()) {
            Ok(Some(credential)) if !credential.token.is_empty() => credential,
            Ok(_) => return vec![Action::AutoLoginSkipped],
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read persisted credential");
                return vec![Action::AutoLoginSkipped];
            }
        };

        // An expired session is rejected outright instead of being
        // restored for an instant.
        let remaining = credential.remaining(Utc::now());
        let Some(remaining) = remaining.to_std().ok().filter(|d| !d.is_zero()) else {
            tracing::info!(email = %credential.email, "Persisted session already expired");
            if let Err(err) = clear_credential(self.storage.as_ref()) {
                tracing::warn!(error = %err, "Failed to clear expired credential");
            }
            return vec![Action::Logout];
        };

        self.timer.schedule_logout(remaining);
        tracing::info!(email = %credential.email, "Session restored");
        vec![Action::AuthenticateSuccess {
            credential,
            redirect: false,
        }]
    }
}

/// Tears down the session: timer, persisted credential, screen.
pub struct LogoutEffect {
    storage: Arc<dyn KeyValueStorage>,
    timer: ExpiryTimer,
    navigator: Arc<dyn Navigator>,
}

impl LogoutEffect {
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        timer: ExpiryTimer,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            storage,
            timer,
            navigator,
        }
    }
}

#[async_trait]
impl Effect for LogoutEffect {
    fn name(&self) -> &'static str {
        "auth_logout"
    }

    fn policy(&self) -> ConcurrencyPolicy {
        ConcurrencyPolicy::Unbounded
    }

    fn accepts(&self, action: &Action) -> bool {
        matches!(action, Action::Logout)
    }

    async fn run(&self, _action: Action) -> Vec<Action> {
        self.timer.cancel_logout();
        if let Err(err) = clear_credential(self.storage.as_ref()) {
            tracing::warn!(error = %err, "Failed to clear persisted credential");
        }
        self.navigator.navigate(Route::Auth);
        Vec::new()
    }
}
