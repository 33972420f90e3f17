use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{CatalogItem, Product};

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CatalogItemList {
    #[schema(value_type = Vec<CatalogItem>)]
    pub items: Vec<CatalogItem>,
}
