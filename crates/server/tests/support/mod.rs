#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;

use server::routes::auth::ServerState;
use service::auth::repository::mock::MockAuthRepository;
use service::auth::service::AuthConfig;
use service::auth::token::TokenIssuer;
use service::products::repository::mock::MockProductRepository;

pub const SECRET: &str = "test-secret";

/// Router over the in-memory repositories, seeded with the demo catalog.
pub fn app() -> Router {
    app_with_users(Arc::new(MockAuthRepository::default()), 4)
}

pub fn app_with_users(users: Arc<MockAuthRepository>, bcrypt_cost: u32) -> Router {
    let products = Arc::new(MockProductRepository::from_catalog(service::seed::catalog()));
    let state = ServerState::new(products, users, AuthConfig { bcrypt_cost }, TokenIssuer::new(SECRET, 1));
    server::startup::build_app(state)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
