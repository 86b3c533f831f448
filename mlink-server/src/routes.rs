use crate::{api, health};

use crate::state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_cookies::CookieManagerLayer;
use tower_http::services::ServeDir;

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let public_dir = state.public_dir.clone();

    Router::new()
        .route("/", get(api::home::home))
        .route(
            "/login",
            get(api::login::complete_login).post(api::login::request_magic_link),
        )
        .route("/logout", get(api::login::logout))
        .route("/register", post(api::register::register))
        .route("/users", get(api::users::list_users))
        .route("/download", get(api::files::download))
        .route("/image", post(api::files::upload_image))
        .route("/health", get(health::health_check))
        // Everything else is a static file under the public directory
        .fallback_service(ServeDir::new(public_dir))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
