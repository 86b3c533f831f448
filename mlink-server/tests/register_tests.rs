//! Integration tests for multipart registration
mod common;

use crate::common::{multipart_body, multipart_content_type, test_app, token_from_email};

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mlink_server::build_router;

fn register_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, multipart_content_type())
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_register_with_avatar_sends_magic_link() {
    let app = test_app().await;
    let avatar = [0x89u8, 0x50, 0x4e, 0x47];

    let body = multipart_body(
        &[("username", "Bob"), ("email", "bob@example.com")],
        Some(("image", "portrait.png", &avatar)),
    );
    let response = build_router(app.state.clone())
        .oneshot(register_request(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/check_email.html"
    );

    // Alice was registered by the fixture, so bob gets the next id
    let bob = app.store.find_by_email("bob@example.com").await.unwrap();
    assert_eq!(bob.username, "Bob");
    assert_eq!(bob.active_token, None);
    let avatar_name = bob.avatar_file_name.clone().unwrap();
    assert_eq!(avatar_name, format!("image_{}.png", bob.id));

    let stored = std::fs::read(
        app.state.public_dir.join("avatars").join(&avatar_name),
    )
    .unwrap();
    assert_eq!(stored, avatar);

    let email = app.mailer.last();
    assert_eq!(email.to, "bob@example.com");
    assert!(!token_from_email(&email).is_empty());
}

#[tokio::test]
async fn test_register_then_login_with_emailed_token() {
    let app = test_app().await;

    let body = multipart_body(
        &[("username", "Bob"), ("email", "bob@example.com")],
        None,
    );
    build_router(app.state.clone())
        .oneshot(register_request(body))
        .await
        .unwrap();

    let token = token_from_email(&app.mailer.last());
    let response = build_router(app.state.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/login?token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let bob = app.store.find_by_email("bob@example.com").await.unwrap();
    assert_eq!(bob.active_token.as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let app = test_app().await;

    let body = multipart_body(
        &[("username", "Imposter"), ("email", "alice@example.com")],
        None,
    );
    let response = build_router(app.state.clone())
        .oneshot(register_request(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("User is already registered"));
    assert_eq!(app.mailer.count(), 0);
}

#[tokio::test]
async fn test_register_requires_email() {
    let app = test_app().await;

    let body = multipart_body(&[("username", "NoEmail")], None);
    let response = build_router(app.state.clone())
        .oneshot(register_request(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("Email is required"));
}
