//! OpenAPI document. Schemas here mirror the JSON the handlers emit.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthDoc { pub status: String, pub uptime: f64, pub time_stamp: DateTime<Utc> }

#[derive(Serialize, ToSchema)]
pub struct BannerDoc { pub message: String, pub version: String, pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: String }

/// Query parameters accepted by `GET /products`.
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    /// inclusive lower price bound
    pub min_price: Option<f64>,
    /// inclusive upper price bound
    pub max_price: Option<f64>,
    /// case-insensitive match on name or description
    pub search: Option<String>,
    /// 1-based, default 1
    pub page: Option<i64>,
    /// default 10, capped at 100
    pub limit: Option<i64>,
    /// `price`, `name` or `createdAt` (default)
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default)
    pub sort_order: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDoc {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// decimal string, two places
    #[schema(example = "59.99")]
    pub price: String,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub stock: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetaDoc { pub total: u64, pub page: u64, pub limit: u64, pub total_pages: u64 }

#[derive(Serialize, ToSchema)]
pub struct ProductPageDoc { pub items: Vec<ProductDoc>, pub meta: PageMetaDoc }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[schema(example = "USER")]
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct SessionDoc { pub user: UserDoc, pub token: String }

#[derive(Serialize, ToSchema)]
pub struct MeDoc { pub user: UserDoc }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::banner,
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
    ),
    components(
        schemas(
            HealthDoc,
            BannerDoc,
            ErrorDoc,
            ProductDoc,
            PageMetaDoc,
            ProductPageDoc,
            RegisterRequest,
            LoginRequest,
            UserDoc,
            SessionDoc,
            MeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products"),
        (name = "auth")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/health", "/products", "/auth/register", "/auth/login", "/auth/me"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
