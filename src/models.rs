use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Alimentos,
    Bebidas,
    Panificados,
    #[serde(rename = "laticínios")]
    Laticinios,
    Outros,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Alimentos => "alimentos",
            Category::Bebidas => "bebidas",
            Category::Panificados => "panificados",
            Category::Laticinios => "laticínios",
            Category::Outros => "outros",
        }
    }

    /// Maps a stored category tag onto the enum. Unknown or missing tags
    /// land in `Outros` so a bad catalog row never hides a product.
    pub fn from_db(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(Category::Outros)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alimentos" => Ok(Category::Alimentos),
            "bebidas" => Ok(Category::Bebidas),
            "panificados" => Ok(Category::Panificados),
            "laticínios" | "laticinios" => Ok(Category::Laticinios),
            "outros" => Ok(Category::Outros),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A catalog entry as shown to consumers: one producer's stock entry of a
/// catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub image: String,
    pub category: Category,
    pub description: String,
    pub producer: String,
    pub unit: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub user_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Producer {
    pub id: i64,
    pub user_id: i64,
    pub store_name: Option<String>,
    pub cnpj: Option<String>,
    pub pickup_address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StockEntry {
    pub id: i64,
    pub producer_id: i64,
    pub item_id: i64,
    #[schema(value_type = String, example = "12.50")]
    pub unit_price: Decimal,
    #[schema(value_type = String, example = "10")]
    pub quantity: Decimal,
    pub available: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("`{0}` is not a number")]
    Invalid(String),
    #[error("amount must not be negative")]
    Negative,
}

/// Parses a user-typed amount. Accepts `,` as the decimal separator, the
/// way Brazilian keyboards enter prices ("12,50").
pub fn parse_amount(input: &str) -> Result<Decimal, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    let normalized = trimmed.replace(',', ".");
    let value = Decimal::from_str(&normalized)
        .map_err(|_| AmountError::Invalid(trimmed.to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmountError::Negative);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_and_dot_amounts() {
        assert_eq!(parse_amount("12,50"), Ok(Decimal::new(1250, 2)));
        assert_eq!(parse_amount(" 3.5 "), Ok(Decimal::new(35, 1)));
    }

    #[test]
    fn rejects_bad_amounts() {
        assert_eq!(parse_amount(""), Err(AmountError::Empty));
        assert_eq!(parse_amount("-1"), Err(AmountError::Negative));
        assert!(matches!(parse_amount("abc"), Err(AmountError::Invalid(_))));
    }

    #[test]
    fn category_round_trips_through_tags() {
        assert_eq!("laticinios".parse::<Category>(), Ok(Category::Laticinios));
        assert_eq!(Category::Laticinios.as_str(), "laticínios");
        assert_eq!(Category::from_db(Some("Bebidas")), Category::Bebidas);
        assert_eq!(Category::from_db(Some("ferramentas")), Category::Outros);
        assert_eq!(Category::from_db(None), Category::Outros);
    }

    #[test]
    fn category_serializes_with_accent() {
        let json = serde_json::to_string(&Category::Laticinios).unwrap();
        assert_eq!(json, "\"laticínios\"");
    }
}
