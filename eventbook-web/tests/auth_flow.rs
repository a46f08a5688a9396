//! Signup/login integration tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use eventbook_web::{create_app, AppState, WebConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Test helper to create a request, optionally authenticated
fn create_request(
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    if let Some(body) = body {
        builder = builder.header("Content-Type", "application/json");
        builder
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    }
}

/// Test helper to extract a JSON response body
async fn extract_json_response(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn test_app() -> axum::Router {
    let config = WebConfig {
        database_url: Some("sqlite::memory:".to_string()),
        jwt_secret: "test-signing-secret".to_string(),
        ..WebConfig::default()
    };
    let state = AppState::new(config).await.unwrap();
    create_app(state)
}

#[tokio::test]
async fn signup_returns_201_with_a_working_token() {
    let app = test_app().await;

    let request = create_request(
        "POST",
        "/api/auth/signup",
        Some(json!({"loginName": "alice", "password": "pw1"})),
        None,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json_response(response).await;
    assert_eq!(body["tokenType"], "bearer");
    assert_eq!(body["loginName"], "alice");
    assert_eq!(body["accessLevel"], "user");
    let token = body["accessToken"].as_str().unwrap();
    let user_id = body["userId"].as_str().unwrap();

    // The token authenticates against a protected endpoint.
    let request = create_request("GET", &format!("/api/users/{}", user_id), None, Some(token));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let profile = extract_json_response(response).await;
    assert_eq!(profile["id"], user_id);
    assert_eq!(profile["eventIds"], json!([]));
}

#[tokio::test]
async fn duplicate_signup_is_rejected_without_creating_a_user() {
    let app = test_app().await;

    let request = create_request(
        "POST",
        "/api/auth/signup",
        Some(json!({"loginName": "alice", "password": "pw1"})),
        None,
    );
    assert_eq!(
        app.clone().oneshot(request).await.unwrap().status(),
        StatusCode::CREATED
    );

    let request = create_request(
        "POST",
        "/api/auth/signup",
        Some(json!({"loginName": "alice", "password": "pw2"})),
        None,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The duplicate's intended password never took effect.
    let request = create_request(
        "POST",
        "/api/auth/login",
        Some(json!({"loginName": "alice", "password": "pw2"})),
        None,
    );
    assert_eq!(
        app.clone().oneshot(request).await.unwrap().status(),
        StatusCode::UNAUTHORIZED
    );

    let request = create_request(
        "POST",
        "/api/auth/login",
        Some(json!({"loginName": "alice", "password": "pw1"})),
        None,
    );
    assert_eq!(
        app.oneshot(request).await.unwrap().status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn signup_then_login_round_trips_the_identity() {
    let app = test_app().await;

    let request = create_request(
        "POST",
        "/api/auth/signup",
        Some(json!({"loginName": "alice", "password": "pw1"})),
        None,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let signup_body = extract_json_response(response).await;

    let request = create_request(
        "POST",
        "/api/auth/login",
        Some(json!({"loginName": "alice", "password": "pw1"})),
        None,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let login_body = extract_json_response(response).await;

    assert_eq!(login_body["userId"], signup_body["userId"]);

    let request = create_request(
        "POST",
        "/api/auth/login",
        Some(json!({"loginName": "alice", "password": "wrong"})),
        None,
    );
    assert_eq!(
        app.oneshot(request).await.unwrap().status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn wrong_password_and_unknown_name_are_indistinguishable() {
    let app = test_app().await;

    let request = create_request(
        "POST",
        "/api/auth/signup",
        Some(json!({"loginName": "alice", "password": "pw1"})),
        None,
    );
    app.clone().oneshot(request).await.unwrap();

    let request = create_request(
        "POST",
        "/api/auth/login",
        Some(json!({"loginName": "alice", "password": "wrong"})),
        None,
    );
    let wrong_password = app.clone().oneshot(request).await.unwrap();

    let request = create_request(
        "POST",
        "/api/auth/login",
        Some(json!({"loginName": "nobody", "password": "wrong"})),
        None,
    );
    let unknown_name = app.oneshot(request).await.unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_name.status(), StatusCode::UNAUTHORIZED);

    // Identical response shape, no username-enumeration hints.
    let a = extract_json_response(wrong_password).await;
    let b = extract_json_response(unknown_name).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn protected_endpoints_reject_missing_and_malformed_headers() {
    let app = test_app().await;

    let request = create_request("GET", "/api/users/u1", None, None);
    assert_eq!(
        app.clone().oneshot(request).await.unwrap().status(),
        StatusCode::UNAUTHORIZED
    );

    let request = Request::builder()
        .method("GET")
        .uri("/api/users/u1")
        .header("Authorization", "Basic dXNlcjpwdw==")
        .body(Body::empty())
        .unwrap();
    assert_eq!(
        app.clone().oneshot(request).await.unwrap().status(),
        StatusCode::UNAUTHORIZED
    );

    let request = create_request("GET", "/api/users/u1", None, Some("not-a-token"));
    assert_eq!(
        app.oneshot(request).await.unwrap().status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn token_for_a_deleted_user_is_still_a_401() {
    // A token whose subject never existed: valid signature, no user.
    let app = test_app().await;

    let codec = eventbook_core::TokenCodec::new(
        b"test-signing-secret",
        chrono::Duration::minutes(60),
    );
    let token = codec.mint("ghost-user").unwrap();

    let request = create_request("GET", "/api/users/ghost-user", None, Some(&token));
    assert_eq!(
        app.oneshot(request).await.unwrap().status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = test_app().await;

    let request = create_request(
        "POST",
        "/api/auth/signup",
        Some(json!({"loginName": "alice", "password": "pw1"})),
        None,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = extract_json_response(response).await;
    let user_id = body["userId"].as_str().unwrap().to_string();

    let codec = eventbook_core::TokenCodec::new(
        b"test-signing-secret",
        chrono::Duration::minutes(60),
    );
    let expired = codec
        .mint_with_ttl(&user_id, chrono::Duration::seconds(-30))
        .unwrap();

    let request = create_request("GET", &format!("/api/users/{}", user_id), None, Some(&expired));
    assert_eq!(
        app.oneshot(request).await.unwrap().status(),
        StatusCode::UNAUTHORIZED
    );
}
