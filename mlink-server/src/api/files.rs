//! File download and image upload endpoints.

use crate::pages;
use crate::state::AppState;

use axum::extract::{Multipart, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use log::{error, info};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadQuery {
    pub file_name: Option<String>,
}

/// A bare file name: no separators, no parent-directory escapes.
fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && !name.contains("..")
}

/// GET /download?fileName=
pub async fn download(State(state): State<AppState>, Query(query): Query<DownloadQuery>) -> Response {
    let Some(file_name) = query.file_name else {
        return pages::error_page(
            &state.public_dir,
            "fileName is required",
            StatusCode::BAD_REQUEST,
        )
        .await;
    };

    if !is_safe_file_name(&file_name) {
        return pages::error_page(
            &state.public_dir,
            "Invalid file name",
            StatusCode::BAD_REQUEST,
        )
        .await;
    }

    match tokio::fs::read(state.public_dir.join(&file_name)).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            bytes,
        )
            .into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// POST /image
///
/// Multipart image upload, stored under the public images directory.
pub async fn upload_image(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return pages::error_page(
                    &state.public_dir,
                    &format!("Invalid form data: {e}"),
                    StatusCode::BAD_REQUEST,
                )
                .await;
            }
        };

        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let file_name = if is_safe_file_name(&original_name) {
            original_name
        } else {
            format!("image_file_{}.jpg", chrono::Utc::now().timestamp_millis())
        };

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return pages::error_page(
                    &state.public_dir,
                    &format!("Invalid image upload: {e}"),
                    StatusCode::BAD_REQUEST,
                )
                .await;
            }
        };

        let path = state.public_dir.join("images").join(&file_name);
        if let Err(e) = tokio::fs::write(&path, &bytes).await {
            error!("Failed to store image {}: {}", path.display(), e);
            return pages::error_page(
                &state.public_dir,
                "Failed to store image",
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .await;
        }

        info!("Stored uploaded image {} ({} bytes)", file_name, bytes.len());
    }

    StatusCode::OK.into_response()
}
