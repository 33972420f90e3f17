use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};

use crate::{
    dto::{
        products::CatalogItemList,
        stock::{PublishStockRequest, StockList, UpdateStockRequest},
    },
    error::AppResult,
    middleware::session::SessionUser,
    models::StockEntry,
    response::ApiResponse,
    services::stock_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stock).post(publish_stock))
        .route("/items", get(list_catalog_items))
        .route("/{id}", put(update_stock).delete(delete_stock))
}

#[utoipa::path(
    get,
    path = "/api/stock/items",
    responses(
        (status = 200, description = "Catalog items that can be published", body = ApiResponse<CatalogItemList>)
    ),
    tag = "Stock"
)]
pub async fn list_catalog_items(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CatalogItemList>>> {
    Ok(Json(stock_service::list_catalog_items(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/stock",
    params(
        ("x-user-id" = i64, Header, description = "Cached session user id")
    ),
    responses(
        (status = 200, description = "Stock entries of the producer", body = ApiResponse<StockList>),
        (status = 403, description = "User is not a producer"),
    ),
    tag = "Stock"
)]
pub async fn list_stock(
    State(state): State<AppState>,
    session: SessionUser,
) -> AppResult<Json<ApiResponse<StockList>>> {
    Ok(Json(stock_service::list_my_stock(&state, &session).await?))
}

#[utoipa::path(
    post,
    path = "/api/stock",
    params(
        ("x-user-id" = i64, Header, description = "Cached session user id")
    ),
    request_body = PublishStockRequest,
    responses(
        (status = 200, description = "Stock entry published", body = ApiResponse<StockEntry>),
        (status = 400, description = "Bad amount or unknown item"),
        (status = 403, description = "User is not a producer"),
    ),
    tag = "Stock"
)]
pub async fn publish_stock(
    State(state): State<AppState>,
    session: SessionUser,
    Json(payload): Json<PublishStockRequest>,
) -> AppResult<Json<ApiResponse<StockEntry>>> {
    Ok(Json(
        stock_service::publish_stock(&state, &session, payload).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/stock/{id}",
    params(
        ("id" = i64, Path, description = "Stock entry ID"),
        ("x-user-id" = i64, Header, description = "Cached session user id")
    ),
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Updated stock entry", body = ApiResponse<StockEntry>),
        (status = 403, description = "Entry belongs to another producer"),
        (status = 404, description = "Stock entry not found"),
    ),
    tag = "Stock"
)]
pub async fn update_stock(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStockRequest>,
) -> AppResult<Json<ApiResponse<StockEntry>>> {
    Ok(Json(
        stock_service::update_stock(&state, &session, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/stock/{id}",
    params(
        ("id" = i64, Path, description = "Stock entry ID"),
        ("x-user-id" = i64, Header, description = "Cached session user id")
    ),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Entry belongs to another producer"),
        (status = 404, description = "Stock entry not found"),
    ),
    tag = "Stock"
)]
pub async fn delete_stock(
    State(state): State<AppState>,
    session: SessionUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(stock_service::delete_stock(&state, &session, id).await?))
}
