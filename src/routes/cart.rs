use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};

use crate::{
    dto::cart::{AddToCartRequest, CartView},
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_view).post(add_to_cart))
        .route("/visibility/open", post(open_cart))
        .route("/visibility/close", post(close_cart))
        .route("/{product_id}", delete(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Current cart", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn cart_view(State(state): State<AppState>) -> Json<ApiResponse<CartView>> {
    Json(cart_service::view_cart(&state))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add one unit of a product", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(payload): Json<AddToCartRequest>,
) -> Json<ApiResponse<CartView>> {
    Json(cart_service::add_to_cart(&state, payload))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Remove one unit; unknown products are ignored", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Json<ApiResponse<CartView>> {
    Json(cart_service::remove_from_cart(&state, &product_id))
}

#[utoipa::path(
    post,
    path = "/api/cart/visibility/open",
    responses(
        (status = 200, description = "Show the cart", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn open_cart(State(state): State<AppState>) -> Json<ApiResponse<CartView>> {
    Json(cart_service::open_cart(&state))
}

#[utoipa::path(
    post,
    path = "/api/cart/visibility/close",
    responses(
        (status = 200, description = "Hide the cart", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn close_cart(State(state): State<AppState>) -> Json<ApiResponse<CartView>> {
    Json(cart_service::close_cart(&state))
}
