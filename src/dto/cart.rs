use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    cart::{CartLine, CartState},
    models::Product,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product: Product,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLineDto>,
    #[schema(value_type = String, example = "25.50")]
    pub total: Decimal,
    pub item_count: usize,
    pub is_open: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineDto {
    pub product: Product,
    pub quantity: u32,
    #[schema(value_type = String, example = "12.50")]
    pub subtotal: Decimal,
}

impl From<&CartLine> for CartLineDto {
    fn from(line: &CartLine) -> Self {
        Self {
            product: line.product.clone(),
            quantity: line.quantity.get(),
            subtotal: line.subtotal(),
        }
    }
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        Self {
            items: state.lines().iter().map(CartLineDto::from).collect(),
            total: state.total(),
            item_count: state.lines().len(),
            is_open: state.is_open(),
        }
    }
}
