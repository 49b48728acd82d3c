use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use service::auth::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};
use service::auth::errors::AuthError;
use service::auth::repository::AuthRepository;
use service::auth::token::{Claims, TokenIssuer};
use service::auth::AuthService;
use service::products::{repository::ProductRepository, ProductService};

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

/// Shared handler state. Services are held behind trait objects so the
/// router runs the same against SeaORM or in-memory repositories.
#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<ProductService<dyn ProductRepository>>,
    pub auth: Arc<AuthService<dyn AuthRepository>>,
    pub tokens: TokenIssuer,
    pub started_at: Instant,
}

impl ServerState {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn AuthRepository>,
        auth_cfg: service::auth::service::AuthConfig,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            products: Arc::new(ProductService::new(products)),
            auth: Arc::new(AuthService::new(users, auth_cfg)),
            tokens,
            started_at: Instant::now(),
        }
    }
}

#[derive(Serialize)]
pub struct MeOutput { pub user: AuthUser }

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = crate::openapi::SessionDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Conflict", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    input: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthSession>), JsonApiError> {
    let Json(input) = input?;
    let user = state.auth.register(input).await?;
    let token = state.tokens.issue(&user).map_err(JsonApiError::internal)?;
    Ok((StatusCode::CREATED, Json(AuthSession { user, token })))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In", body = crate::openapi::SessionDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    input: Result<Json<LoginInput>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthSession>), JsonApiError> {
    let Json(input) = input?;
    let user = state.auth.login(input).await?;
    let token = state.tokens.issue(&user).map_err(JsonApiError::internal)?;

    let mut cookie = Cookie::new(AUTH_COOKIE, token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(AuthSession { user, token })))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = crate::openapi::MeDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn me(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<MeOutput>, JsonApiError> {
    let id = claims.user_id()?;
    let user = state.auth.current_user(id).await.map_err(|e| match e {
        AuthError::NotFound => JsonApiError::unauthorized("account no longer exists"),
        other => other.into(),
    })?;
    Ok(Json(MeOutput { user }))
}

/// Reads `Authorization: Bearer <token>`, falling back to the `auth_token`
/// cookie. Missing, invalid or expired tokens answer 401; verified claims
/// are stored in the request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_owned();

    let token = match req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(t) => t.trim().to_string(),
            None => {
                tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(JsonApiError::unauthorized("expected a Bearer token"));
            }
        },
        None => {
            // Cookie 回退
            let jar = CookieJar::from_headers(req.headers());
            match jar.get(AUTH_COOKIE).map(|c| c.value().to_string()) {
                Some(t) if !t.is_empty() => t,
                _ => {
                    tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
                    return Err(JsonApiError::unauthorized("missing token"));
                }
            }
        }
    };

    match state.tokens.verify(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            Err(JsonApiError::unauthorized("invalid or expired token"))
        }
    }
}
