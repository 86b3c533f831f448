//! Multipart registration: account fields plus an optional avatar image.

use crate::api::login::send_magic_link;
use crate::pages;
use crate::state::AppState;

use mlink_store::StoreError;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use log::error;

/// Registration inputs collected from the multipart form
#[derive(Debug, Default)]
struct RegistrationForm {
    username: String,
    email: String,
    avatar: Option<Vec<u8>>,
}

async fn read_form(multipart: &mut Multipart) -> Result<RegistrationForm, String> {
    let mut form = RegistrationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Invalid form data: {e}"))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if field.file_name().is_some() {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| format!("Invalid image upload: {e}"))?;
            if !bytes.is_empty() {
                form.avatar = Some(bytes.to_vec());
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| format!("Invalid form data: {e}"))?;
        match name.as_str() {
            "username" => form.username = value,
            "email" => form.email = value,
            _ => {}
        }
    }

    Ok(form)
}

/// POST /register
///
/// Creates the account, stores the avatar under `avatars/image_<id>.png`,
/// and mails the first magic link. The avatar file name is recorded even
/// when no image was uploaded, matching what the pages expect.
pub async fn register(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(message) => {
            return pages::error_page(&state.public_dir, &message, StatusCode::BAD_REQUEST).await;
        }
    };

    if form.email.is_empty() {
        return pages::error_page(&state.public_dir, "Email is required", StatusCode::BAD_REQUEST)
            .await;
    }
    if form.username.is_empty() {
        return pages::error_page(
            &state.public_dir,
            "Username is required",
            StatusCode::BAD_REQUEST,
        )
        .await;
    }

    let user = match state.store.register(&form.email, &form.username, None).await {
        Ok(user) => user,
        Err(StoreError::AlreadyRegistered { .. }) => {
            return pages::error_page(
                &state.public_dir,
                "User is already registered",
                StatusCode::BAD_REQUEST,
            )
            .await;
        }
        Err(e) => {
            error!("Registration failed: {}", e);
            return pages::error_page(
                &state.public_dir,
                "Something went wrong",
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .await;
        }
    };

    let avatar_file_name = format!("image_{}.png", user.id);
    if let Some(bytes) = form.avatar {
        let path = state.public_dir.join("avatars").join(&avatar_file_name);
        if let Err(e) = tokio::fs::write(&path, bytes).await {
            error!("Failed to store avatar {}: {}", path.display(), e);
        }
    }

    let user = match state.store.set_avatar(user.id, avatar_file_name).await {
        Ok(user) => user,
        Err(e) => {
            error!("Failed to record avatar: {}", e);
            return pages::error_page(
                &state.public_dir,
                "Something went wrong",
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .await;
        }
    };

    let token = match state.sessions.authority().issue(&user) {
        Ok(token) => token,
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
