//! HTML pages with `{{key}}` template substitution.
//!
//! Pages are read from the public directory on every request, so edits to
//! the HTML files show up without a restart.

use std::path::Path;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use log::error;

/// Replace every `{{key}}` placeholder with its substitution value.
/// Unknown placeholders are left untouched.
pub fn hydrate(template: &str, substitutions: &[(&str, &str)]) -> String {
    substitutions
        .iter()
        .fold(template.to_string(), |page, (key, value)| {
            page.replace(&format!("{{{{{key}}}}}"), value)
        })
}

/// Render a page from the public directory with substitutions applied.
pub async fn render(
    public_dir: &Path,
    file: &str,
    substitutions: &[(&str, &str)],
    status: StatusCode,
) -> Response {
    match tokio::fs::read_to_string(public_dir.join(file)).await {
        Ok(template) => (status, Html(hydrate(&template, substitutions))).into_response(),
        Err(e) => {
            error!("Failed to read page {}: {}", file, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Missing page: {file}"),
            )
                .into_response()
        }
    }
}

/// Serve a page verbatim.
pub async fn serve(public_dir: &Path, file: &str, status: StatusCode) -> Response {
    render(public_dir, file, &[], status).await
}

/// Render `error.html` hydrated with a human-readable message. Falls back
/// to inline HTML when the template itself is missing, so an error is
/// never swallowed.
pub async fn error_page(public_dir: &Path, message: &str, status: StatusCode) -> Response {
    match tokio::fs::read_to_string(public_dir.join("error.html")).await {
        Ok(template) => (status, Html(hydrate(&template, &[("error", message)]))).into_response(),
        Err(_) => (
            status,
            Html(format!(
                "<html><body><h1>Error</h1><p>{message}</p></body></html>"
            )),
        )
            .into_response(),
    }
}
