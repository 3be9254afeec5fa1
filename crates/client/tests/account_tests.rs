//! Account endpoint tests.
//!
//! This module tests registration, logout, and the bearer-authenticated
//! profile and balance reads, including the single retry after a 401.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::TimeDelta;
use common::*;
use serde_json::json;
use transit_auth::{AuthState, RegistrationRequest};
use wiremock::matchers::{any, body_json, header, method, path};

#[tokio::test]
async fn test_register_success_does_not_log_in() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts/register"))
        .and(body_json(json!({
            "email": "rider@example.com",
            "password": "hunter2",
            "confirmPassword": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let manager = manager_for(&mock_server);
    manager
        .register(&RegistrationRequest::new("rider@example.com", "hunter2", "hunter2"))
        .await
        .unwrap();

    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn test_register_password_mismatch_makes_no_network_call() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let manager = manager_for(&mock_server);
    let err = manager
        .register(&RegistrationRequest::new("rider@example.com", "hunter2", "hunter3"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
}

#[tokio::test]
async fn test_register_surfaces_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts/register"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "Email already registered" })),
        )
        .mount(&mock_server)
        .await;

    let manager = manager_for(&mock_server);
    let err = manager
        .register(&RegistrationRequest::new("rider@example.com", "hunter2", "hunter2"))
        .await
        .unwrap_err();

    match err {
        ClientError::RegistrationFailed { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "Email already registered");
        }
        other => panic!("Expected RegistrationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_register_falls_back_to_reason_phrase() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts/register"))
        .respond_with(ResponseTemplate::new(400).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let manager = manager_for(&mock_server);
    let err = manager
        .register(&RegistrationRequest::new("rider@example.com", "hunter2", "hunter2"))
        .await
        .unwrap_err();

    match err {
        ClientError::RegistrationFailed { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Bad Request");
        }
        other => panic!("Expected RegistrationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_logout_sends_refresh_token_and_clears_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(body_json(json!({ "refreshToken": "refresh-valid" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let manager = manager_for(&mock_server);
    store_valid_session(&manager, "access-1", TimeDelta::minutes(10));

    manager.logout().await;

    assert!(!manager.is_authenticated());
    assert_eq!(manager.state(), AuthState::Anonymous);
}

#[tokio::test]
async fn test_logout_remote_failure_still_clears_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let manager = manager_for(&mock_server);
    store_valid_session(&manager, "access-1", TimeDelta::minutes(10));

    manager.logout().await;

    assert!(!manager.is_authenticated());
    assert!(manager.session_snapshot().is_none());
}

#[tokio::test]
async fn test_logout_without_session_makes_no_call() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let manager = manager_for(&mock_server);
    manager.logout().await;
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn test_profile_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/me"))
        .and(header("Authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "rider-1",
            "email": "rider@example.com",
            "firstName": "Ada",
            "homeStation": "Central",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let manager = manager_for(&mock_server);
    store_valid_session(&manager, "access-1", TimeDelta::minutes(10));

    let profile = manager.profile().await.unwrap();
    assert_eq!(profile.id.as_deref(), Some("rider-1"));
    assert_eq!(profile.first_name.as_deref(), Some("Ada"));
    assert_eq!(profile.extra["homeStation"], "Central");
}

#[tokio::test]
async fn test_balance_retries_once_after_401() {
    let mock_server = MockServer::start().await;
    let refreshed = jwt_expiring_in(TimeDelta::minutes(15));

    Mock::given(method("GET"))
        .and(path("/accounts/me/balance"))
        .and(header("Authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refreshToken": "refresh-valid" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_pair_body(&refreshed, "r-2")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/accounts/me/balance"))
        .and(header("Authorization", format!("Bearer {refreshed}").as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "balance": 1250, "currency": "EUR" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let manager = manager_for(&mock_server);
    store_valid_session(&manager, "access-1", TimeDelta::minutes(10));

    let balance = manager.balance().await.unwrap();
    assert_eq!(balance.balance, Some(1250));
    assert_eq!(balance.currency.as_deref(), Some("EUR"));
}

#[tokio::test]
async fn test_balance_second_401_is_returned() {
    let mock_server = MockServer::start().await;
    let refreshed = jwt_expiring_in(TimeDelta::minutes(15));
    let balance_calls = Arc::new(AtomicUsize::new(0));
    let counter = balance_calls.clone();

    Mock::given(method("GET"))
        .and(path("/accounts/me/balance"))
        .respond_with(move |_req: &wiremock::Request| {
            counter.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(401)
        })
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_pair_body(&refreshed, "r-2")))
        .mount(&mock_server)
        .await;

    let manager = manager_for(&mock_server);
    store_valid_session(&manager, "access-1", TimeDelta::minutes(10));

    let err = manager.balance().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(balance_calls.load(Ordering::SeqCst), 2);
}
