//! Plain data entities shared by the store, the effects and the API layer.

mod credential;
mod record;

pub use credential::{Credential, StoredCredential};
pub use record::{Ingredient, Record};
