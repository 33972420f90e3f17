use crate::{
    checkout::{CheckoutOutcome, CheckoutReceipt},
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn checkout(state: &AppState) -> AppResult<ApiResponse<CheckoutReceipt>> {
    match state.checkout.checkout(&state.cart).await? {
        CheckoutOutcome::EmptyCart => Ok(ApiResponse::without_data("Cart is empty")),
        CheckoutOutcome::HandedOff(receipt) => Ok(ApiResponse::success(
            "Order sent to WhatsApp",
            receipt,
            Some(Meta::empty()),
        )),
    }
}
