use crate::{
    dto::cart::{AddToCartRequest, CartView},
    response::{ApiResponse, Meta},
    state::AppState,
};

fn cart_response(state: &AppState, message: &str) -> ApiResponse<CartView> {
    let view = CartView::from(&state.cart.snapshot());
    let meta = Meta::count(view.item_count);
    ApiResponse::success(message, view, Some(meta))
}

pub fn view_cart(state: &AppState) -> ApiResponse<CartView> {
    cart_response(state, "OK")
}

pub fn add_to_cart(state: &AppState, payload: AddToCartRequest) -> ApiResponse<CartView> {
    state.cart.add_to_cart(payload.product);
    cart_response(state, "Added to cart")
}

pub fn remove_from_cart(state: &AppState, product_id: &str) -> ApiResponse<CartView> {
    state.cart.remove_from_cart(product_id);
    cart_response(state, "Removed from cart")
}

pub fn open_cart(state: &AppState) -> ApiResponse<CartView> {
    state.cart.open_cart();
    cart_response(state, "Cart opened")
}

pub fn close_cart(state: &AppState) -> ApiResponse<CartView> {
    state.cart.close_cart();
    cart_response(state, "Cart closed")
}
