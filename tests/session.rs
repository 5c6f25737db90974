mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{accept_sign_in, client_for, SIGNED_IN_USER};
use forum_client::api::ApiError;
use forum_client::session::SessionProvider;
use serde_json::json;

#[tokio::test]
async fn test_sign_in_stores_session() {
    let backend = MockBackend::start().await;
    accept_sign_in(&backend).await;
    let sessions = SessionProvider::new(client_for(&backend));
    let handle = sessions.handle();

    let session = sessions
        .sign_in(" ann@example.com ", "correct horse")
        .await
        .expect("sign-in succeeds");

    assert_eq!(session.token, "tok-123");
    assert!(handle.is_signed_in());
    assert_eq!(handle.username().as_deref(), Some(SIGNED_IN_USER));

    let sent = backend
        .requests_to("POST", "/authentications/sign-in/email")
        .await;
    assert_eq!(
        sent[0].json(),
        json!({ "email": "ann@example.com", "password": "correct horse" })
    );
}

#[tokio::test]
async fn test_rejected_sign_in_uses_generic_message() {
    let backend = MockBackend::start().await;
    backend
        .route(
            "POST",
            "/authentications/sign-in/email",
            MockResponse::error(401, "Invalid email or password"),
        )
        .await;
    let sessions = SessionProvider::new(client_for(&backend));

    let err = sessions
        .sign_in("ann@example.com", "wrong")
        .await
        .expect_err("sign-in fails");

    assert_eq!(err.to_string(), "Unable to log in currently!");
    assert!(sessions.current().is_none());
}

#[tokio::test]
async fn test_invalid_email_is_rejected_locally() {
    let backend = MockBackend::start().await;
    let sessions = SessionProvider::new(client_for(&backend));

    let err = sessions.sign_in("not-an-email", "pw").await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert!(backend.captured_requests().await.is_empty());
}

#[tokio::test]
async fn test_sign_up_checks_password_length() {
    let backend = MockBackend::start().await;
    let sessions = SessionProvider::new(client_for(&backend));

    let err = sessions
        .sign_up("Ann", "ann@example.com", "short")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Password must be at least 8 characters");
    assert!(backend.captured_requests().await.is_empty());
}

#[tokio::test]
async fn test_sign_up_signs_in() {
    let backend = MockBackend::start().await;
    backend
        .route(
            "POST",
            "/authentications/sign-up/email",
            MockResponse::value(json!({
                "token": "tok-new",
                "user": { "id": "u2", "name": "Cat", "email": "cat@example.com" },
            })),
        )
        .await;
    let sessions = SessionProvider::new(client_for(&backend));

    sessions
        .sign_up("Cat", "cat@example.com", "long enough")
        .await
        .expect("sign-up succeeds");

    assert_eq!(sessions.handle().username().as_deref(), Some("Cat"));
    let sent = backend
        .requests_to("POST", "/authentications/sign-up/email")
        .await;
    assert_eq!(sent[0].json()["name"], "Cat");
}

#[tokio::test]
async fn test_refresh_reads_active_session() {
    let backend = MockBackend::start().await;
    backend
        .route(
            "GET",
            "/authentications/get-session",
            MockResponse::value(json!({
                "session": { "token": "tok-9" },
                "user": { "id": "u1", "name": "Ann", "email": "ann@example.com" },
            })),
        )
        .await;
    let sessions = SessionProvider::new(client_for(&backend));

    let session = sessions.refresh().await.expect("refresh succeeds");

    assert_eq!(session.map(|s| s.token).as_deref(), Some("tok-9"));
    assert!(sessions.handle().is_signed_in());
}

#[tokio::test]
async fn test_refresh_without_session_signs_out() {
    let backend = MockBackend::start().await;
    accept_sign_in(&backend).await;
    backend
        .route(
            "GET",
            "/authentications/get-session",
            MockResponse::json("null"),
        )
        .await;
    let sessions = SessionProvider::new(client_for(&backend));
    sessions
        .sign_in("ann@example.com", "correct horse")
        .await
        .expect("sign-in succeeds");

    let session = sessions.refresh().await.expect("refresh succeeds");

    assert!(session.is_none());
    assert!(!sessions.handle().is_signed_in());
}

#[tokio::test]
async fn test_sign_out_clears_session_even_on_failure() {
    let backend = MockBackend::start().await;
    accept_sign_in(&backend).await;
    backend
        .route(
            "POST",
            "/authentications/sign-out",
            MockResponse::error(500, "auth service down"),
        )
        .await;
    let sessions = SessionProvider::new(client_for(&backend));
    sessions
        .sign_in("ann@example.com", "correct horse")
        .await
        .expect("sign-in succeeds");

    let result = sessions.sign_out().await;

    assert!(result.is_err());
    assert!(sessions.current().is_none());
}

#[tokio::test]
async fn test_session_cookie_is_sent_on_later_requests() {
    let backend = MockBackend::start().await;
    accept_sign_in(&backend).await;
    backend
        .route("GET", "/likes/me", MockResponse::value(json!({ "likes": [] })))
        .await;
    let client = client_for(&backend);
    let sessions = SessionProvider::new(client.clone());
    sessions
        .sign_in("ann@example.com", "correct horse")
        .await
        .expect("sign-in succeeds");

    client.my_likes().await.expect("likes load");

    let sent = backend.requests_to("GET", "/likes/me").await;
    let cookie = sent[0].header("cookie").unwrap_or_default();
    assert!(cookie.contains("session_token=tok-123"), "cookie: {}", cookie);
}
