use axum::{Json, Router, extract::State, routing::post};

use crate::{
    checkout::CheckoutReceipt, error::AppResult, response::ApiResponse,
    services::checkout_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(checkout))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    responses(
        (status = 200, description = "Order handed to WhatsApp, or nothing to send", body = ApiResponse<CheckoutReceipt>),
        (status = 409, description = "Another checkout is running"),
        (status = 422, description = "Seller has no phone number"),
        (status = 502, description = "Seller lookup failed"),
        (status = 503, description = "WhatsApp not available"),
    ),
    tag = "Checkout"
)]
pub async fn checkout(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CheckoutReceipt>>> {
    Ok(Json(checkout_service::checkout(&state).await?))
}
