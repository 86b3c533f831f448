use crate::state::AppState;

use mlink_core::User;

use axum::Json;
use axum::extract::State;

/// GET /users
///
/// Raw dump of the user store. Debug surface only.
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store.all().await)
}
