pub mod auth;
pub mod products;

use axum::{
    extract::State,
    http::{HeaderName, HeaderValue},
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    set_header::SetResponseHeaderLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Health, ServiceBanner};

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Service banner", body = crate::openapi::BannerDoc)))]
pub async fn banner() -> Json<ServiceBanner> {
    Json(ServiceBanner::new("SyntaxWear E-commerce API is running!", env!("CARGO_PKG_VERSION")))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Liveness", body = crate::openapi::HealthDoc)))]
pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    Json(Health::ok(state.started_at.elapsed().as_secs_f64()))
}

/// Hardening headers added to every response unless a handler set them.
/// No Content-Security-Policy is sent.
const SECURITY_HEADERS: [(&str, &str); 11] = [
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

fn with_security_headers(router: Router) -> Router {
    SECURITY_HEADERS.iter().fold(router, |router, &(name, value)| {
        router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}

/// Build the full application router: public catalog, auth, and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Routes behind the bearer token check
    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ));

    let app = Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/products", get(products::list))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .merge(protected)
        .with_state(state)
        .merge(SwaggerUi::new("/api-docs").url("/openapi.json", ApiDoc::openapi()));

    with_security_headers(app)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
