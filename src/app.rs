//! Application wiring: one store, one expiry timer, every effect.

use std::sync::Arc;

use crate::api::{AuthApi, AuthMode, Endpoints, HttpTransport, RecordsApi};
use crate::auth::{
    AuthRedirectEffect, AuthenticateEffect, AutoLoginEffect, ExpiryTimer, LogoutEffect,
};
use crate::effects::EffectRunner;
use crate::model::Credential;
use crate::navigation::Navigator;
use crate::records::{FetchRecordsEffect, StoreRecordsEffect};
use crate::storage::KeyValueStorage;
use crate::store::{Action, Store};

/// External capabilities the core talks to.
pub struct AppDeps {
    pub transport: Arc<dyn HttpTransport>,
    pub storage: Arc<dyn KeyValueStorage>,
    pub navigator: Arc<dyn Navigator>,
    pub endpoints: Endpoints,
}

pub struct App {
    store: Store,
    timer: ExpiryTimer,
    effects: EffectRunner,
}

impl App {
    /// Build the store and register every effect.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(deps: AppDeps) -> Self {
        let store = Store::new();
        let timer = ExpiryTimer::new(store.clone());

        let auth_api = Arc::new(AuthApi::new(
            Arc::clone(&deps.transport),
            deps.endpoints.clone(),
        ));
        let records_api = Arc::new(RecordsApi::new(
            Arc::clone(&deps.transport),
            deps.endpoints,
        ));

        let mut effects = EffectRunner::new(store.clone());
        for mode in [AuthMode::SignUp, AuthMode::Login] {
            effects.register(Arc::new(AuthenticateEffect::new(
                mode,
                Arc::clone(&auth_api),
                Arc::clone(&deps.storage),
                timer.clone(),
            )));
        }
        effects.register(Arc::new(AuthRedirectEffect::new(Arc::clone(
            &deps.navigator,
        ))));
        effects.register(Arc::new(AutoLoginEffect::new(
            Arc::clone(&deps.storage),
            timer.clone(),
        )));
        effects.register(Arc::new(LogoutEffect::new(
            Arc::clone(&deps.storage),
            timer.clone(),
            Arc::clone(&deps.navigator),
        )));
        effects.register(Arc::new(FetchRecordsEffect::new(
            store.clone(),
            Arc::clone(&records_api),
        )));
        effects.register(Arc::new(StoreRecordsEffect::new(store.clone(), records_api)));

        tracing::debug!(effects = effects.len(), "Application started");

        Self {
            store,
            timer,
            effects,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn timer(&self) -> &ExpiryTimer {
        &self.timer
    }

    /// Dispatch `action` and resolve with the first later action matching
    /// `until`.
    ///
    /// The tap is opened before dispatching, so a result produced
    /// immediately is not missed.
    pub async fn dispatch_and_wait<F>(&self, action: Action, mut until: F) -> Option<Action>
    where
        F: FnMut(&Action) -> bool,
    {
        let mut actions = self.store.actions();
        self.store.dispatch(action);
        while let Some(seen) = actions.recv().await {
            if until(&seen) {
                return Some(seen);
            }
        }
        None
    }

    /// Run auto-login and wait for its outcome.
    ///
    /// Returns the restored credential, or `None` when nothing valid was
    /// persisted.
    pub async fn restore_session(&self) -> Option<Credential> {
        let outcome = self
            .dispatch_and_wait(Action::AutoLogin, |action| {
                matches!(
                    action,
                    Action::AuthenticateSuccess {
                        redirect: false,
                        ..
                    } | Action::AutoLoginSkipped
                        | Action::Logout
                )
            })
            .await;

        match outcome {
            Some(Action::AuthenticateSuccess { credential, .. }) => Some(credential),
            _ => None,
        }
    }

    /// Stop the expiry timer and wind down every effect, letting in-flight
    /// work finish.
    pub async fn shutdown(self) {
        self.timer.cancel_logout();
        self.effects.shutdown().await;
        tracing::debug!("Application stopped");
    }
}
