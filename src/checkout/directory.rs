//! Seller contact lookup.
//!
//! A cart line only knows its stock entry id. The seller is found by
//! following `estoque.produtor_id → produtores.usuario_id → usuarios`. Each
//! hop may be missing in a hosted database, so every join boundary is an
//! `Option` here instead of a nullable column bag.

use async_trait::async_trait;
use mockall::automock;
use sqlx::FromRow;
use thiserror::Error;

use crate::db::DbPool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContact {
    pub user_id: i64,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerContact {
    pub producer_id: i64,
    pub display_name: Option<String>,
    pub user: Option<UserContact>,
}

impl ProducerContact {
    /// Store name, falling back to the owner's personal name.
    pub fn name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.user.as_ref().and_then(|user| user.name.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockOwner {
    pub stock_id: i64,
    pub producer: Option<ProducerContact>,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("seller lookup query failed")]
    Query(#[from] sqlx::Error),
}

#[automock]
#[async_trait]
pub trait SellerDirectory: Send + Sync {
    /// Finds who sells the stock entry behind `product_id`. `Ok(None)` means
    /// no such stock entry exists.
    async fn stock_owner(&self, product_id: &str) -> Result<Option<StockOwner>, DirectoryError>;
}

#[derive(Debug, Clone)]
pub struct PgSellerDirectory {
    pool: DbPool,
}

impl PgSellerDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct StockOwnerRow {
    stock_id: i64,
    producer_id: Option<i64>,
    producer_name: Option<String>,
    user_id: Option<i64>,
    user_name: Option<String>,
    phone: Option<String>,
}

impl From<StockOwnerRow> for StockOwner {
    fn from(row: StockOwnerRow) -> Self {
        let user = row.user_id.map(|user_id| UserContact {
            user_id,
            name: row.user_name,
            phone: row.phone,
        });
        let producer = row.producer_id.map(|producer_id| ProducerContact {
            producer_id,
            display_name: row.producer_name,
            user,
        });
        StockOwner {
            stock_id: row.stock_id,
            producer,
        }
    }
}

#[async_trait]
impl SellerDirectory for PgSellerDirectory {
    async fn stock_owner(&self, product_id: &str) -> Result<Option<StockOwner>, DirectoryError> {
        let row = sqlx::query_as::<_, StockOwnerRow>(
            r#"
            SELECT e.id AS stock_id,
                   p.id AS producer_id, p.nome_produtor AS producer_name,
                   u.id AS user_id, u.nome AS user_name, u.telefone AS phone
            FROM estoque e
            LEFT JOIN produtores p ON p.id = e.produtor_id
            LEFT JOIN usuarios u ON u.id = p.usuario_id
            WHERE e.id::text = $1
            LIMIT 1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StockOwner::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> StockOwnerRow {
        StockOwnerRow {
            stock_id: 7,
            producer_id: Some(3),
            producer_name: Some("Fazenda Verde Vida".into()),
            user_id: Some(11),
            user_name: Some("Maria Silva".into()),
            phone: Some("(11) 99999-9999".into()),
        }
    }

    #[test]
    fn full_row_nests_every_hop() {
        let owner = StockOwner::from(row());
        let producer = owner.producer.unwrap();
        assert_eq!(producer.name(), Some("Fazenda Verde Vida"));
        assert_eq!(producer.user.unwrap().phone.as_deref(), Some("(11) 99999-9999"));
    }

    #[test]
    fn missing_producer_drops_the_user_too() {
        let owner = StockOwner::from(StockOwnerRow {
            producer_id: None,
            ..row()
        });
        assert_eq!(owner.stock_id, 7);
        assert!(owner.producer.is_none());
    }

    #[test]
    fn producer_name_falls_back_to_user_name() {
        let owner = StockOwner::from(StockOwnerRow {
            producer_name: Some("  ".into()),
            ..row()
        });
        assert_eq!(owner.producer.unwrap().name(), Some("Maria Silva"));
    }
}
