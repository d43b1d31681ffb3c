//! Identity
//!
//! Stubbed single-user identity: a fixed operator record cached in the
//! store's metadata blob. No real authentication.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_USER_EMAIL, DEFAULT_USER_ID, DEFAULT_USER_NAME};
use crate::store::RecordStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: DEFAULT_USER_ID.to_string(),
            email: DEFAULT_USER_EMAIL.to_string(),
            full_name: DEFAULT_USER_NAME.to_string(),
        }
    }
}

/// The current user, writing the fixed default into metadata on first call.
pub fn current_user(store: &mut RecordStore) -> User {
    if let Some(value) = &store.meta().current_user {
        if let Ok(user) = serde_json::from_value::<User>(value.clone()) {
            return user;
        }
    }

    let user = User::default();
    // Serializing a plain struct of strings cannot fail
    let value = serde_json::to_value(&user).unwrap_or_default();
    store.set_current_user(Some(value));
    user
}
