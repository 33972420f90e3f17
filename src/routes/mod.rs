use axum::Router;

use crate::state::AppState;

pub mod cart;
pub mod checkout;
pub mod doc;
pub mod health;
pub mod params;
pub mod products;
pub mod profile;
pub mod stock;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/cart", cart::router())
        .nest("/checkout", checkout::router())
        .nest("/stock", stock::router())
        .nest("/profile", profile::router())
}
