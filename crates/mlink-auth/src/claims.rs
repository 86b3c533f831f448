use crate::{AuthError, Result as AuthResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// The fixed set of fields signed into every magic-link token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id the link was issued for
    pub id: i64,
    /// Registered email (the store lookup key)
    pub email: String,
    /// Display name, carried for page rendering
    pub username: String,
    /// Absolute expiration timestamp (Unix)
    pub exp: i64,
}

impl Claims {
    /// Validate claims after signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthResult<()> {
        if self.email.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "email".to_string(),
                message: "email cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
