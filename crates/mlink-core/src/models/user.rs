//! User entity - a registered account in the login service.

use serde::{Deserialize, Serialize};

/// A registered account. `email` is the unique key across the store.
///
/// `active_token` holds the session token the user last logged in with;
/// `None` means logged out. The field is only ever written through the
/// store so that every change is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    /// File name of the avatar image held by the file collaborator,
    /// not the image bytes themselves.
    #[serde(default)]
    pub avatar_file_name: Option<String>,
    #[serde(default)]
    pub active_token: Option<String>,
}

impl User {
    /// Create a freshly registered user (logged out, no avatar yet)
    pub fn new(id: i64, email: String, username: String) -> Self {
        Self {
            id,
            email,
            username,
            avatar_file_name: None,
            active_token: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.active_token.is_some()
    }
}
