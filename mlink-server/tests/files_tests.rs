//! Integration tests for file serving, uploads, and the health endpoint
mod common;

use crate::common::{multipart_body, multipart_content_type, test_app};

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mlink_server::build_router;

#[tokio::test]
async fn test_download_serves_public_file() {
    let app = test_app().await;
    std::fs::write(app.state.public_dir.join("notes.txt"), b"hello").unwrap();

    let response = build_router(app.state.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/download?fileName=notes.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"hello");
}

#[tokio::test]
async fn test_download_missing_file_is_404() {
    let app = test_app().await;

    let response = build_router(app.state.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/download?fileName=missing.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_rejects_path_traversal() {
    let app = test_app().await;

    for name in ["..%2Fsecret", "a%2Fb.txt", "..evil..name"] {
        let response = build_router(app.state.clone())
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/download?fileName={name}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_image_upload_stored_under_images() {
    let app = test_app().await;

    let body = multipart_body(&[], Some(("image_file", "photo.jpg", b"jpegbytes")));
    let response = build_router(app.state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/image")
                .header(header::CONTENT_TYPE, multipart_content_type())
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = std::fs::read(app.state.public_dir.join("images/photo.jpg")).unwrap();
    assert_eq!(stored, b"jpegbytes");
}

#[tokio::test]
async fn test_static_fallback_serves_check_email_page() {
    let app = test_app().await;

    let response = build_router(app.state.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/check_email.html")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8(bytes.to_vec())
        .unwrap()
        .contains("Check your email"));
}

#[tokio::test]
async fn test_users_dump_uses_wire_field_names() {
    let app = test_app().await;

    let response = build_router(app.state.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let users = json.as_array().unwrap();
    // Seed user plus alice from the fixture
    assert_eq!(users.len(), 2);
    assert_eq!(users[1]["email"], "alice@example.com");
    assert!(users[1].get("activeToken").is_some());
}

#[tokio::test]
async fn test_health_reports_store_and_mailer() {
    let app = test_app().await;

    let response = build_router(app.state.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["status"], "healthy");
    assert_eq!(json["components"]["store"]["users"], 2);
    assert_eq!(json["components"]["email"], "recorder");
}
