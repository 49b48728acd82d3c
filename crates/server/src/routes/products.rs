use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use models::product;
use service::pagination::Page;
use service::products::ProductFilter;

use super::auth::ServerState;
use crate::errors::JsonApiError;

/// Public catalog listing. Bad query values answer 400 with the JSON error body.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(crate::openapi::ProductListParams),
    responses(
        (status = 200, description = "One page of active products", body = crate::openapi::ProductPageDoc),
        (status = 400, description = "Invalid filter", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    filter: Result<Query<ProductFilter>, QueryRejection>,
) -> Result<Json<Page<product::Model>>, JsonApiError> {
    let Query(filter) = filter?;
    let page = state.products.list(filter).await?;
    Ok(Json(page))
}
