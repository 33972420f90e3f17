use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::StockEntry;

/// Amounts arrive as typed by the producer; `,` is accepted as the decimal
/// separator.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishStockRequest {
    pub item_id: i64,
    #[schema(example = "12,50")]
    pub price: String,
    #[schema(example = "10")]
    pub quantity: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStockRequest {
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct StockList {
    #[schema(value_type = Vec<StockEntry>)]
    pub items: Vec<StockEntry>,
}
