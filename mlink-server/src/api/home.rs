//! Landing page: login form for visitors, home page for sessions.

use crate::api::{clear_session_cookie, session_token};
use crate::state::AppState;
use crate::pages;

use mlink_auth::AuthError;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use log::error;
use tower_cookies::Cookies;

/// GET /
///
/// With a session cookie, validate it and render `home.html`; otherwise
/// serve the login form. An undecodable cookie revokes whatever it held
/// and starts over, a logged-out user just gets the cookie cleared.
pub async fn home(State(state): State<AppState>, cookies: Cookies) -> Response {
    let Some(token) = session_token(&state, &cookies) else {
        return pages::serve(&state.public_dir, "index.html", StatusCode::OK).await;
    };

    match state.sessions.validate_session(&token).await {
        Ok(user) => {
            pages::render(
                &state.public_dir,
                "home.html",
                &[
                    ("username", user.username.as_str()),
                    ("avatarFileName", user.avatar_file_name.as_deref().unwrap_or("")),
                ],
                StatusCode::OK,
            )
            .await
        }
        Err(AuthError::Expired { .. }) => {
            pages::error_page(&state.public_dir, "Token is expired", StatusCode::BAD_REQUEST).await
        }
        Err(AuthError::UserNotFound { .. }) => {
            pages::error_page(
                &state.public_dir,
                "User is not registered",
                StatusCode::BAD_REQUEST,
            )
            .await
        }
        Err(AuthError::LoggedOut { .. }) => {
            clear_session_cookie(&state, &cookies);
            Redirect::to("/").into_response()
        }
        Err(AuthError::InvalidSignature { .. } | AuthError::InvalidClaim { .. }) => {
            if let Err(e) = state.sessions.revoke(&token).await {
                error!("Failed to revoke session for bad cookie: {}", e);
            }
            clear_session_cookie(&state, &cookies);
            Redirect::to("/").into_response()
        }
        Err(e) => {
            error!("Session validation failed: {}", e);
            pages::error_page(
                &state.public_dir,
                "Something went wrong",
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .await
        }
    }
}
