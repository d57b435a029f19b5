//! Authentication slice, its effects and the token lifecycle.

mod effects;
mod persistence;
mod reducer;
mod state;
mod timer;

pub use effects::{AuthRedirectEffect, AuthenticateEffect, AutoLoginEffect, LogoutEffect};
pub use persistence::{clear_credential, persist_credential, restore_credential, USER_DATA_KEY};
pub use reducer::AuthReducer;
pub use state::AuthState;
pub use timer::ExpiryTimer;
