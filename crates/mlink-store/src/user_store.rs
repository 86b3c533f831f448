//! Authoritative user store: an in-memory list persisted to a flat JSON file.
//!
//! The whole store is rewritten on every mutation. Each mutating operation
//! takes the store mutex for its full read-modify-write-persist cycle, so
//! concurrent request handlers cannot interleave half-applied updates or
//! torn file writes.

use crate::{Result as StoreResult, StoreError};

use mlink_core::User;

use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use log::{info, warn};
use tokio::sync::Mutex;

pub struct UserStore {
    path: PathBuf,
    users: Mutex<Vec<User>>,
}

impl UserStore {
    /// Load the store from `path`. A missing or unreadable file degrades to
    /// a single seeded user instead of failing startup; the file is written
    /// out on the first mutation.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let users = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => match serde_json::from_str::<Vec<User>>(&contents) {
                Ok(users) => {
                    info!("Loaded {} users from {}", users.len(), path.display());
                    users
                }
                Err(e) => {
                    warn!(
                        "Store file {} is not valid JSON ({}), seeding default user",
                        path.display(),
                        e
                    );
                    vec![Self::seed_user()]
                }
            },
            Err(e) => {
                warn!(
                    "Store file {} unreadable ({}), seeding default user",
                    path.display(),
                    e
                );
                vec![Self::seed_user()]
            }
        };

        Self {
            path,
            users: Mutex::new(users),
        }
    }

    fn seed_user() -> User {
        User {
            id: 1,
            email: String::from("admin@example.com"),
            username: String::from("Admin"),
            avatar_file_name: Some(String::from("image_1.png")),
            active_token: None,
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let users = self.users.lock().await;
        users.iter().find(|u| u.email == email).cloned()
    }

    pub async fn find_by_token(&self, token: &str) -> Option<User> {
        let users = self.users.lock().await;
        users
            .iter()
            .find(|u| u.active_token.as_deref() == Some(token))
            .cloned()
    }

    /// Snapshot of every record, in registration order.
    pub async fn all(&self) -> Vec<User> {
        self.users.lock().await.clone()
    }

    /// Register a new user. Ids are `count + 1` and never reclaimed
    /// (deletion is not supported). The new record starts logged out.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        avatar_file_name: Option<String>,
    ) -> StoreResult<User> {
        let mut users = self.users.lock().await;

        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::AlreadyRegistered {
                email: email.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut user = User::new(
            users.len() as i64 + 1,
            email.to_string(),
            username.to_string(),
        );
        user.avatar_file_name = avatar_file_name;
        users.push(user.clone());

        self.persist(&users).await?;
        Ok(user)
    }

    /// Replace the user's session token (`None` logs them out) and persist.
    pub async fn set_active_token(&self, id: i64, token: Option<String>) -> StoreResult<User> {
        self.update(id, |user| user.active_token = token).await
    }

    /// Record the avatar file name assigned by the file collaborator.
    pub async fn set_avatar(&self, id: i64, file_name: String) -> StoreResult<User> {
        self.update(id, |user| user.avatar_file_name = Some(file_name))
            .await
    }

    async fn update<F>(&self, id: i64, apply: F) -> StoreResult<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.lock().await;

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::UnknownUser {
                id,
                location: ErrorLocation::from(Location::caller()),
            })?;

        apply(user);
        let updated = user.clone();

        self.persist(&users).await?;
        Ok(updated)
    }

    /// Serialize the entire store. Callers hold the lock, so the in-memory
    /// state and the file never diverge between mutations.
    async fn persist(&self, users: &[User]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(users)?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
