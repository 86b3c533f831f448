//! Magic-link login endpoints.

use crate::api::{clear_session_cookie, session_token, set_session_cookie};
use crate::mailer::{Mailer, Result as MailerResult};
use crate::pages;
use crate::state::AppState;

use mlink_auth::AuthError;
use mlink_core::User;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use log::{debug, error, warn};
use serde::Deserialize;
use serde_json::json;
use tower_cookies::Cookies;

#[derive(Debug, Deserialize)]
pub struct MagicLinkRequest {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteLoginQuery {
    pub token: Option<String>,
}

/// POST /login
///
/// The login form posts an email here; a magic link goes out by mail and
/// the browser is pointed at the "check your email" page.
pub async fn request_magic_link(
    State(state): State<AppState>,
    axum::Form(request): axum::Form<MagicLinkRequest>,
) -> Response {
    let Some(email) = request.email.filter(|email| !email.is_empty()) else {
        return pages::error_page(&state.public_dir, "Email is required", StatusCode::BAD_REQUEST)
            .await;
    };

    let (user, token) = match state.sessions.issue_for_email(&email).await {
        Ok(issued) => issued,
        Err(AuthError::UserNotFound { .. }) => {
            return pages::error_page(
                &state.public_dir,
                "User is not registered",
                StatusCode::BAD_REQUEST,
            )
            .await;
        }
        Err(e) => {
            error!("Failed to issue magic link: {}", e);
            return pages::error_page(
                &state.public_dir,
                "Something went wrong",
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .await;
        }
    };

    match send_magic_link(&state, &user, &token).await {
        Ok(()) => Redirect::to("/check_email.html").into_response(),
        Err(e) => {
            error!("Failed to send magic link to {}: {}", user.email, e);
            pages::error_page(
                &state.public_dir,
                &e.to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .await
        }
    }
}

/// Email the user their login link. The body template lives next to the
/// served pages; a missing template degrades to a plain fallback body.
pub(crate) async fn send_magic_link(
    state: &AppState,
    user: &User,
    token: &str,
) -> MailerResult<()> {
    let link = format!("{}/login?token={}", state.public_url, token);
    debug!("Magic link for {}: {}", user.email, link);

    let body = match tokio::fs::read_to_string(state.public_dir.join("magic_link_email.html")).await
    {
        Ok(template) => pages::hydrate(
            &template,
            &[
                ("username", user.username.as_str()),
                ("email", user.email.as_str()),
                ("magicLink", link.as_str()),
            ],
        ),
        Err(_) => format!(
            "<p>Hello {},</p><p><a href=\"{}\">Click here to log in</a></p>",
            user.username, link
        ),
    };

    let subject = format!("Magic Link for {}", user.username);
    state.mailer.send(&user.email, &subject, &body).await
}

/// GET /login?token=
///
/// The link from the email lands here. Success stores the token as the
/// user's session, sets the cookie, and redirects home; every failure
/// renders the error page.
pub async fn complete_login(
    State(state): State<AppState>,
    Query(query): Query<CompleteLoginQuery>,
    cookies: Cookies,
) -> Response {
    let Some(token) = query.token else {
        return pages::error_page(&state.public_dir, "Token is required", StatusCode::BAD_REQUEST)
            .await;
    };

    match state.sessions.complete_login(&token).await {
        Ok(_) => {
            set_session_cookie(&state, &cookies, &token);
            Redirect::to("/").into_response()
        }
        Err(e @ (AuthError::Store { .. } | AuthError::Encode { .. })) => {
            error!("Login failed: {}", e);
            pages::error_page(
                &state.public_dir,
                "Something went wrong",
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .await
        }
        Err(e) => {
            let message = match e {
                AuthError::Expired { .. } => "Token is expired",
                AuthError::UserNotFound { .. } => "User is not registered",
                AuthError::TokenAlreadyUsed { .. } => "Token is already in use",
                _ => "Token is invalid",
            };
            pages::error_page(&state.public_dir, message, StatusCode::BAD_REQUEST).await
        }
    }
}

/// GET /logout
///
/// Revoke the cookie's token (a no-op for unknown tokens) and clear the
/// cookie.
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Response {
    if let Some(token) = session_token(&state, &cookies)
        && let Err(e) = state.sessions.revoke(&token).await
    {
        warn!("Failed to revoke session on logout: {}", e);
    }

    clear_session_cookie(&state, &cookies);
    Json(json!({ "message": "Logged out" })).into_response()
}
