//! Session lifecycle over the user store.
//!
//! A user's `active_token` field is the whole session state: `None` is
//! logged out, `Some(token)` is logged in. All transitions run through
//! here so that every change is persisted by the store.

use crate::{AuthError, Result as AuthResult, TokenAuthority};

use mlink_core::User;
use mlink_store::UserStore;

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::debug;

pub struct SessionService {
    authority: TokenAuthority,
    store: Arc<UserStore>,
}

impl SessionService {
    pub fn new(authority: TokenAuthority, store: Arc<UserStore>) -> Self {
        Self { authority, store }
    }

    pub fn authority(&self) -> &TokenAuthority {
        &self.authority
    }

    /// Issue a fresh magic-link token for the registered owner of `email`.
    pub async fn issue_for_email(&self, email: &str) -> AuthResult<(User, String)> {
        let user =
            self.store
                .find_by_email(email)
                .await
                .ok_or_else(|| AuthError::UserNotFound {
                    email: email.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        let token = self.authority.issue(&user)?;
        Ok((user, token))
    }

    /// Complete a login from a clicked magic link.
    ///
    /// Tokens are single-use: presenting the token that is already stored
    /// as the user's `active_token` is rejected with `TokenAlreadyUsed`,
    /// so re-clicking the same still-valid link fails. A different valid
    /// token for the same user simply replaces the stored one; only one
    /// login at a time is not enforced.
    pub async fn complete_login(&self, token: &str) -> AuthResult<User> {
        let claims = self.authority.verify(token)?;

        let user = self.store.find_by_email(&claims.email).await.ok_or_else(|| {
            AuthError::UserNotFound {
                email: claims.email.clone(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        if user.active_token.as_deref() == Some(token) {
            return Err(AuthError::TokenAlreadyUsed {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let user = self
            .store
            .set_active_token(user.id, Some(token.to_string()))
            .await?;

        debug!("User {} logged in", user.email);
        Ok(user)
    }

    /// Log out whoever holds `token`. Unrecognized tokens are a no-op,
    /// not an error.
    pub async fn revoke(&self, token: &str) -> AuthResult<()> {
        if let Some(user) = self.store.find_by_token(token).await {
            self.store.set_active_token(user.id, None).await?;
            debug!("Session revoked for {}", user.email);
        }

        Ok(())
    }

    /// Check a session cookie for page rendering.
    ///
    /// Requires a verifiable, unexpired token whose user exists and is
    /// currently logged in. The presented token is NOT compared against
    /// the stored `active_token` here; only `complete_login` makes that
    /// comparison.
    pub async fn validate_session(&self, token: &str) -> AuthResult<User> {
        let claims = self.authority.verify(token)?;

        let user = self.store.find_by_email(&claims.email).await.ok_or_else(|| {
            AuthError::UserNotFound {
                email: claims.email.clone(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        if !user.is_logged_in() {
            return Err(AuthError::LoggedOut {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(user)
    }
}
