//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use forum_client::api::ForumClient;
use forum_client::config::Config;
use forum_client::session::SessionProvider;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

use mock_backend::{MockBackend, MockResponse};

pub const SIGNED_IN_USER: &str = "Ann";

/// Config pointing at the mock backend.
pub fn config_for(backend: &MockBackend) -> Config {
    let mut config = Config::default();
    config.server.base_url = backend.base_url();
    config.defaults.timeout_seconds = 5;
    config.defaults.connect_timeout_seconds = 2;
    config
}

pub fn client_for(backend: &MockBackend) -> ForumClient {
    ForumClient::new(&config_for(backend)).expect("Failed to build client")
}

/// Write `content` to a config file in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Wire fixtures ------------------------------------------------------------

pub fn post_json(id: &str, author: &str, like_count: i64) -> Value {
    json!({
        "id": id,
        "title": format!("Title {}", id),
        "content": format!("Content of {}", id),
        "createdAt": "2025-03-01T10:00:00.000Z",
        "user": { "username": author.to_lowercase(), "name": author },
        "likeCount": like_count,
    })
}

pub fn posts_body(posts: Vec<Value>) -> MockResponse {
    MockResponse::value(json!({ "posts": posts }))
}

pub fn comment_json(id: &str, author: &str, content: &str) -> Value {
    json!({
        "id": id,
        "content": content,
        "createdAt": "2025-03-02T08:30:00.000Z",
        "user": { "username": author.to_lowercase(), "name": author },
    })
}

pub fn comments_body(comments: Vec<Value>) -> MockResponse {
    MockResponse::value(json!({ "comments": comments }))
}

pub fn likes_body(post_ids: &[&str]) -> MockResponse {
    let likes: Vec<Value> = post_ids
        .iter()
        .enumerate()
        .map(|(i, id)| json!({ "id": format!("l{}", i), "postId": id }))
        .collect();
    MockResponse::value(json!({ "likes": likes }))
}

// -- Session helpers ----------------------------------------------------------

/// Route the sign-in endpoint so that any credentials succeed.
pub async fn accept_sign_in(backend: &MockBackend) {
    backend
        .route(
            "POST",
            "/authentications/sign-in/email",
            MockResponse::value(json!({
                "token": "tok-123",
                "user": { "id": "u1", "name": SIGNED_IN_USER, "email": "ann@example.com" },
            }))
            .with_header("set-cookie", "session_token=tok-123; Path=/; HttpOnly"),
        )
        .await;
}

/// A session provider already signed in as [`SIGNED_IN_USER`].
pub async fn signed_in(backend: &MockBackend, client: &ForumClient) -> SessionProvider {
    accept_sign_in(backend).await;
    let sessions = SessionProvider::new(client.clone());
    sessions
        .sign_in("ann@example.com", "correct horse")
        .await
        .expect("Sign-in should succeed against the mock");
    sessions
}
