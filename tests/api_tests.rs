//! HTTP API tests
//! Exercise the router in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use portal::api::{create_router, AppState};
use portal::auth::{AuthService, PasswordHasher, StoredUser, TokenService, User};
use portal::config::Config;
use portal::db::{InMemoryUserRepository, UserRepository};
use serde_json::{json, Value};
use tower::util::ServiceExt;

const PASSWORD: &str = "clave";

async fn app() -> Router {
    let hasher = PasswordHasher::new(4);
    let repo = InMemoryUserRepository::new();
    for (email, role) in [
        ("ana@example.com", "residente"),
        ("admin@example.com", "administrador"),
        ("guardia@example.com", "vigilante"),
    ] {
        let mut user = User::new("Test", "User", email, role);
        user.house_number = "B-12".to_string();
        repo.insert(StoredUser {
            user,
            password_hash: hasher.hash(PASSWORD).unwrap(),
        })
        .await
        .unwrap();
    }

    let auth = AuthService::new(Arc::new(repo), TokenService::new("api-secret", 3600), hasher);
    create_router(Arc::new(AppState::new(Config::default(), auth)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"email": email, "password": password}).to_string(),
        ))
        .unwrap()
}

async fn token_for(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(login_request(email, PASSWORD))
        .await
        .unwrap();
    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = app()
        .await
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"], "healthy");
}

#[tokio::test]
async fn test_login_success_returns_token_and_user() {
    let response = app()
        .await
        .oneshot(login_request("guardia@example.com", PASSWORD))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["token"].as_str().unwrap().split('.').count(), 3);
    assert_eq!(body["user"]["role"], "vigilante");
    assert_eq!(body["user"]["house_number"], "B-12");
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_login_bad_credentials() {
    let response = app()
        .await
        .oneshot(login_request("ana@example.com", "nope"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid email or password");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_missing_fields() {
    let response = app()
        .await
        .oneshot(login_request("", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_me_requires_token() {
    let response = app()
        .await
        .oneshot(Request::get("/api/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_token() {
    let app = app().await;
    let token = token_for(&app, "admin@example.com").await;

    let response = app
        .oneshot(
            Request::get("/api/auth/me")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["email"], "admin@example.com");
}

#[tokio::test]
async fn test_navigate_anonymous_goes_to_login() {
    let response = app()
        .await
        .oneshot(
            Request::get("/api/navigate?path=%2Fprofile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["path"], "/login?redirect=%2Fprofile");
    assert_eq!(body["data"]["layout"], "plain");
}

#[tokio::test]
async fn test_navigate_guard_token_lands_on_checkpoint() {
    let app = app().await;
    let token = token_for(&app, "guardia@example.com").await;

    let response = app
        .oneshot(
            Request::get("/api/navigate?path=%2Fhome&width=390")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["data"]["path"], "/vigilante");
    assert_eq!(body["data"]["redirects"], json!(["/vigilante"]));
    assert_eq!(body["data"]["layout"], "guard");
}

#[tokio::test]
async fn test_navigate_rejects_relative_path() {
    let response = app()
        .await
        .oneshot(
            Request::get("/api/navigate?path=home")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_navigate_with_invalid_token_is_anonymous() {
    let response = app()
        .await
        .oneshot(
            Request::get("/api/navigate?path=%2Fadmin")
                .header("Authorization", "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["data"]["path"], "/login?redirect=%2Fadmin");
}
