//! Magic-link token signing and verification.

use crate::{AuthError, Claims, Result as AuthResult};

use mlink_core::User;

use std::panic::Location;

use chrono::{Duration, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// Issues and verifies HS256-signed magic-link tokens.
///
/// A token is a URL-safe opaque string encoding [`Claims`] with an absolute
/// expiration. Possession of a valid token is the only authentication proof
/// the service accepts; the session lifecycle on top of it lives in
/// [`crate::SessionService`].
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl TokenAuthority {
    /// Create an authority with a symmetric secret and a token lifetime
    /// in minutes.
    pub fn new(secret: &str, token_ttl_minutes: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // A link expires the second its `exp` claim says it does
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_ttl: Duration::minutes(token_ttl_minutes),
        }
    }

    /// Sign a fresh token for `user`, expiring `token_ttl` from now.
    #[track_caller]
    pub fn issue(&self, user: &User) -> AuthResult<String> {
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            exp: (Utc::now() + self.token_ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|source| {
            AuthError::Encode {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Decode and check a presented token.
    ///
    /// Returns `Expired` when the embedded expiration has passed, and
    /// `InvalidSignature` for anything tampered, truncated, or signed with
    /// a different secret.
    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::Expired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::InvalidSignature {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }
}
