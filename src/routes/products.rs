use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::products::ProductList,
    error::AppResult,
    response::ApiResponse,
    routes::params::CatalogQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_products))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("category" = Option<String>, Query, description = "alimentos, bebidas, panificados, laticínios, outros or todos"),
        ("q" = Option<String>, Query, description = "Search on product name")
    ),
    responses(
        (status = 200, description = "Available products", body = ApiResponse<ProductList>),
        (status = 400, description = "Unknown category"),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(catalog_service::list_products(&state, query).await?))
}
