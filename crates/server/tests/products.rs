mod support;

use axum::http::StatusCode;
use tower::ServiceExt;

use support::{app, body_json, get};

#[tokio::test]
async fn filtered_listing_matches_scenario() {
    let resp = app()
        .oneshot(get("/products?minPrice=20&maxPrice=60&sortBy=price&sortOrder=asc&limit=3"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let prices: Vec<&str> = body["items"].as_array().unwrap().iter().map(|p| p["price"].as_str().unwrap()).collect();
    assert_eq!(prices, ["22.50", "24.99", "24.99"]);
    assert_eq!(body["meta"]["total"], 6);
    assert_eq!(body["meta"]["totalPages"], 2);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 3);
}

#[tokio::test]
async fn default_listing_returns_first_page() {
    let body = body_json(app().oneshot(get("/products")).await.unwrap()).await;
    assert_eq!(body["meta"]["total"], 10);
    assert_eq!(body["meta"]["limit"], 10);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn bad_filters_are_bad_requests() {
    for uri in ["/products?limit=0", "/products?page=0", "/products?minPrice=50&maxPrice=10", "/products?sortBy=color", "/products?minPrice=abc"] {
        let resp = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Bad Request", "{uri}");
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn health_and_banner() {
    let app = app();
    let health = body_json(app.clone().oneshot(get("/health")).await.unwrap()).await;
    assert_eq!(health["status"], "ok");
    assert!(health["uptime"].as_f64().unwrap() >= 0.0);
    assert!(health["timeStamp"].is_string());

    let banner = body_json(app.oneshot(get("/")).await.unwrap()).await;
    assert_eq!(banner["status"], "running");
    assert!(banner["version"].is_string());
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = app();
    let ok = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(ok.headers()["x-content-type-options"], "nosniff");
    assert_eq!(ok.headers()["x-frame-options"], "SAMEORIGIN");
    assert!(ok.headers().get("content-security-policy").is_none());

    let bad = app.oneshot(get("/products?limit=0")).await.unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    assert_eq!(bad.headers()["referrer-policy"], "no-referrer");
}
