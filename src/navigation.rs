//! Screen changes requested by effects.
//!
//! The presentation layer lives outside this crate; effects only say
//! where the user should end up.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Landing screen after an interactive login.
    Home,
    /// Login / sign-up screen.
    Auth,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Auth => write!(f, "/auth"),
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator for headless use: records the request in the log.
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = %route, "Navigation requested");
    }
}
