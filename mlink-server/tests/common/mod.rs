#![allow(dead_code)]

//! Test infrastructure for mlink-server API tests

use mlink_auth::{SessionService, TokenAuthority};
use mlink_server::mailer::{Mailer, Result as MailerResult};
use mlink_server::state::AppState;
use mlink_store::UserStore;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

pub const TEST_SECRET: &str = "integration-test-secret-32-bytes";
pub const COOKIE_NAME: &str = "mlink_session";

#[derive(Debug, Clone)]
pub struct RecordedEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mailer double that records every message instead of delivering it.
pub struct RecordingMailer {
    pub sent: Mutex<Vec<RecordedEmail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn last(&self) -> RecordedEmail {
        self.sent
            .lock()
            .unwrap()
            .last()
            .expect("no email was recorded")
            .clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    fn name(&self) -> &'static str {
        "recorder"
    }

    async fn send(&self, to: &str, subject: &str, html_body: &str) -> MailerResult<()> {
        self.sent.lock().unwrap().push(RecordedEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: html_body.to_string(),
        });
        Ok(())
    }
}

pub struct TestApp {
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
    pub store: Arc<UserStore>,
    // Held so the public dir and store file outlive the test
    pub temp: TempDir,
}

/// Build an app over a temp public dir with alice already registered.
pub async fn test_app() -> TestApp {
    let temp = TempDir::new().unwrap();
    let public_dir = temp.path().join("public");

    for sub in ["avatars", "images"] {
        std::fs::create_dir_all(public_dir.join(sub)).unwrap();
    }
    write_pages(&public_dir);

    let store = Arc::new(UserStore::load(temp.path().join("users.json")).await);
    store
        .register("alice@example.com", "Alice", None)
        .await
        .unwrap();

    let authority = TokenAuthority::new(TEST_SECRET, 20);
    let sessions = Arc::new(SessionService::new(authority, store.clone()));
    let mailer = Arc::new(RecordingMailer::new());

    let state = AppState {
        store: store.clone(),
        sessions,
        mailer: mailer.clone(),
        public_dir,
        public_url: "http://localhost:8080".to_string(),
        cookie_name: COOKIE_NAME.to_string(),
    };

    TestApp {
        state,
        mailer,
        store,
        temp,
    }
}

fn write_pages(public_dir: &std::path::Path) {
    let pages = [
        ("index.html", "<html><body><h1>Log in</h1></body></html>"),
        (
            "home.html",
            "<html><body>Welcome {{username}} <img src=\"avatars/{{avatarFileName}}\"></body></html>",
        ),
        (
            "error.html",
            "<html><body><h1>Error</h1><p>{{error}}</p></body></html>",
        ),
        (
            "check_email.html",
            "<html><body><h1>Check your email</h1></body></html>",
        ),
        (
            "magic_link_email.html",
            "<html><body><p>Hello {{username}} ({{email}})</p><a href=\"{{magicLink}}\">Log in</a></body></html>",
        ),
    ];

    for (name, contents) in pages {
        std::fs::write(public_dir.join(name), contents).unwrap();
    }
}

/// Pull the raw token out of a recorded magic-link email body.
pub fn token_from_email(email: &RecordedEmail) -> String {
    let start = email
        .body
        .find("token=")
        .expect("email body has no token parameter")
        + "token=".len();
    let rest = &email.body[start..];
    let end = rest
        .find(|c: char| c == '"' || c == '\'' || c == '<' || c.is_whitespace())
        .unwrap_or(rest.len());
    rest[..end].to_string()
}

/// First Set-Cookie header value of a response.
pub fn set_cookie_header(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Build a multipart/form-data body from text fields and an optional file.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((name, file_name, bytes)) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}
