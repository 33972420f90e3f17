use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CatalogQuery {
    /// Category tag, or `todos` for every category.
    pub category: Option<String>,
    /// Case-insensitive search on the product name.
    pub q: Option<String>,
}
