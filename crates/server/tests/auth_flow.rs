mod support;

use axum::http::{header, Request, StatusCode};
use axum::body::Body;
use serde_json::json;
use tower::ServiceExt;

use std::sync::Arc;

use service::auth::repository::mock::MockAuthRepository;
use support::{app, app_with_users, body_json, get, json_request};

fn registration() -> serde_json::Value {
    json!({
        "email": "a@x.com",
        "password": "secret1",
        "firstName": "A",
        "lastName": "B",
        "birthDate": "1990-12-10"
    })
}

#[tokio::test]
async fn register_returns_user_and_token() {
    let app = app();
    let resp = app.oneshot(json_request("POST", "/auth/register", registration())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["firstName"], "A");
    assert_eq!(body["user"]["role"], "USER");
    assert_eq!(body["user"]["birthDate"], "1990-12-10");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn duplicate_registration_is_conflict() {
    let app = app();
    let first = app.clone().oneshot(json_request("POST", "/auth/register", registration())).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = app.oneshot(json_request("POST", "/auth/register", registration())).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn invalid_registration_is_bad_request() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/auth/register", json!({"email": "a@x.com", "password": "123", "firstName": "A"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Bad Request");

    // missing required field
    let resp = app.oneshot(json_request("POST", "/auth/register", json!({"email": "a@x.com"}))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_sets_cookie_and_me_accepts_it() {
    let app = app();
    app.clone().oneshot(json_request("POST", "/auth/register", registration())).await.unwrap();

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/auth/login", json!({"email": "a@x.com", "password": "secret1"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    let token = body_json(resp).await["token"].as_str().unwrap().to_string();

    // bearer header
    let req = Request::builder()
        .uri("/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["user"]["email"], "a@x.com");

    // cookie fallback
    let pair = cookie.split(';').next().unwrap().to_string();
    let req = Request::builder().uri("/auth/me").header(header::COOKIE, pair).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_failures_look_the_same() {
    let app = app();
    app.clone().oneshot(json_request("POST", "/auth/register", registration())).await.unwrap();

    let wrong = app
        .clone()
        .oneshot(json_request("POST", "/auth/login", json!({"email": "a@x.com", "password": "wrong-one"})))
        .await
        .unwrap();
    let unknown = app
        .oneshot(json_request("POST", "/auth/login", json!({"email": "nobody@x.com", "password": "secret1"})))
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let (a, b) = (body_json(wrong).await, body_json(unknown).await);
    assert_eq!(a, b);
    assert_eq!(a["error"], "Unauthorized");
    assert_eq!(a["message"], "invalid email or password");
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let app = app();
    let resp = app.clone().oneshot(get("/auth/me")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/auth/me")
        .header(header::AUTHORIZATION, "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/auth/me")
        .header(header::AUTHORIZATION, "Basic YTpi")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn hashing_failure_is_a_500_and_stores_nothing() {
    let users = Arc::new(MockAuthRepository::default());
    // bcrypt refuses costs below 4
    let app = app_with_users(users.clone(), 2);
    let resp = app.oneshot(json_request("POST", "/auth/register", registration())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Internal Server Error");
    assert_eq!(body["message"], "internal server error");
    assert!(users.is_empty());
}
