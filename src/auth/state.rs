use crate::model::Credential;
use crate::store::Slice;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub user: Option<Credential>,
    /// True only between a `*Start` action and its terminal success/fail.
    pub loading: bool,
    /// Set by a failed attempt, cleared by the next attempt or `ClearError`.
    pub auth_error: Option<String>,
}

impl Slice for AuthState {}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
