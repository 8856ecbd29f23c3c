use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes::{self, auth::ServerState};
use service::auth::password::PasswordPolicy;
use service::auth::repository::{mock::MockAuthStorage, AuthStorage};
use service::auth::token::Claims;
use service::auth::AuthService;

const APP_SECRET: &str = "test-secret";

fn test_router() -> Router {
    let storage: Arc<dyn AuthStorage> =
        Arc::new(MockAuthStorage::default().with_app(1, "test-app", APP_SECRET));
    let svc = AuthService::new(
        storage,
        PasswordPolicy::new(8, 1, 1).unwrap(),
        Duration::from_secs(3600),
    );
    let state = ServerState { auth: Arc::new(svc) };
    routes::build_router(CorsLayer::very_permissive(), state, Duration::from_secs(5))
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, String) {
    let resp = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let resp = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn health_is_public() {
    let router = test_router();
    let (status, body) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["status"], "ok");
}

#[tokio::test]
async fn register_then_conflict() {
    let router = test_router();

    let (status, body) = post_json(
        &router,
        "/auth/register",
        json!({"email": "dup@example.com", "password": "securepass"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let user_id = serde_json::from_str::<Value>(&body).unwrap()["user_id"].as_i64().unwrap();
    assert!(user_id > 0);

    let (status, body) = post_json(
        &router,
        "/auth/register",
        json!({"email": "dup@example.com", "password": "securepass"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, "user already exists");
}

#[tokio::test]
async fn register_validates_fields() {
    let router = test_router();

    let (status, body) =
        post_json(&router, "/auth/register", json!({"email": "", "password": "pw"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "email is required");

    let (status, body) =
        post_json(&router, "/auth/register", json!({"email": "a@x.com", "password": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "password is required");
}

#[tokio::test]
async fn login_validates_fields() {
    let router = test_router();

    let cases = [
        (json!({"email": "", "password": "pw", "app_id": 1}), "email is required"),
        (json!({"email": "a@x.com", "password": "", "app_id": 1}), "password is required"),
        (json!({"email": "a@x.com", "password": "pw", "app_id": 0}), "app_id is required"),
        (json!({"email": "a@x.com", "password": "pw"}), "app_id is required"),
    ];
    for (input, expected) in cases {
        let (status, body) = post_json(&router, "/auth/login", input).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, expected);
    }
}

#[tokio::test]
async fn login_roundtrip_issues_decodable_token() {
    let router = test_router();

    let (_, body) = post_json(
        &router,
        "/auth/register",
        json!({"email": "a@x.com", "password": "pw1"}),
    )
    .await;
    let user_id = serde_json::from_str::<Value>(&body).unwrap()["user_id"].as_i64().unwrap();

    let (status, body) = post_json(
        &router,
        "/auth/login",
        json!({"email": "a@x.com", "password": "pw1", "app_id": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = serde_json::from_str::<Value>(&body).unwrap()["token"].as_str().unwrap().to_string();

    let decoded = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(APP_SECRET.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .unwrap();
    assert_eq!(decoded.claims.uid, user_id);
    assert_eq!(decoded.claims.email, "a@x.com");
    assert_eq!(decoded.claims.app_id, 1);
}

#[tokio::test]
async fn bad_credentials_do_not_reveal_which_field_was_wrong() {
    let router = test_router();
    post_json(&router, "/auth/register", json!({"email": "a@x.com", "password": "pw1"})).await;

    let (wrong_status, wrong_body) = post_json(
        &router,
        "/auth/login",
        json!({"email": "a@x.com", "password": "wrong", "app_id": 1}),
    )
    .await;
    let (unknown_status, unknown_body) = post_json(
        &router,
        "/auth/login",
        json!({"email": "ghost@x.com", "password": "pw1", "app_id": 1}),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body, "invalid email or password");
}

#[tokio::test]
async fn unprovisioned_app_is_a_server_error() {
    let router = test_router();
    post_json(&router, "/auth/register", json!({"email": "a@x.com", "password": "pw1"})).await;

    let (status, body) = post_json(
        &router,
        "/auth/login",
        json!({"email": "a@x.com", "password": "pw1", "app_id": 42}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "internal error");
}

#[tokio::test]
async fn is_admin_contract() {
    let router = test_router();

    let (_, body) =
        post_json(&router, "/auth/register", json!({"email": "a@x.com", "password": "pw1"})).await;
    let user_id = serde_json::from_str::<Value>(&body).unwrap()["user_id"].as_i64().unwrap();

    let (status, body) = get(&router, &format!("/auth/is_admin/{user_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["is_admin"], false);

    let (status, body) = get(&router, "/auth/is_admin/0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "user_id is required");

    let (status, body) = get(&router, "/auth/is_admin/424242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "user not found");
}

#[tokio::test]
async fn metrics_endpoint_exposes_counters() {
    let router = test_router();
    post_json(&router, "/auth/register", json!({"email": "m@x.com", "password": "pw"})).await;

    let (status, body) = get(&router, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("sso_auth_requests_total"));
}
