use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::{
    dto::products::ProductList,
    error::{AppError, AppResult},
    models::{Category, Product},
    response::{ApiResponse, Meta},
    routes::params::CatalogQuery,
    state::AppState,
};

/// Category chip plus search box of the home screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub search: Option<String>,
}

impl CatalogFilter {
    /// `category=todos` (or no category) matches every product.
    pub fn from_query(query: &CatalogQuery) -> AppResult<Self> {
        let category = match query.category.as_deref().map(str::trim) {
            None | Some("") | Some("todos") => None,
            Some(tag) => Some(
                tag.parse::<Category>()
                    .map_err(|err| AppError::BadRequest(err.to_string()))?,
            ),
        };
        let search = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        Ok(Self { category, search })
    }

    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self.category.is_none_or(|c| product.category == c);
        let search_ok = self
            .search
            .as_deref()
            .is_none_or(|needle| product.name.to_lowercase().contains(needle));
        category_ok && search_ok
    }

    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

#[derive(FromRow)]
struct CatalogRow {
    id: String,
    name: String,
    price: Decimal,
    image: Option<String>,
    category: Option<String>,
    description: Option<String>,
    producer: Option<String>,
    unit: Option<String>,
}

impl From<CatalogRow> for Product {
    fn from(row: CatalogRow) -> Self {
        Product {
            category: Category::from_db(row.category.as_deref()),
            id: row.id,
            name: row.name,
            price: row.price,
            image: row.image.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            producer: row.producer.unwrap_or_default(),
            unit: row.unit.unwrap_or_else(|| "unidade".to_string()),
        }
    }
}

pub async fn fetch_available(state: &AppState) -> AppResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, CatalogRow>(
        r#"
        SELECT e.id::text AS id, i.nome AS name, e.preco_unitario AS price,
               i.imagem_url AS image, i.categoria AS category, i.descricao AS description,
               COALESCE(p.nome_produtor, u.nome) AS producer, t.nome AS unit
        FROM estoque e
        JOIN itens i ON i.id = e.item_id
        JOIN produtores p ON p.id = e.produtor_id
        JOIN usuarios u ON u.id = p.usuario_id
        LEFT JOIN tipos_item t ON t.id = i.tipo_item_id
        WHERE e.disponivel = TRUE
        ORDER BY i.nome, e.id
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(rows.into_iter().map(Product::from).collect())
}

pub async fn list_products(
    state: &AppState,
    query: CatalogQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let filter = CatalogFilter::from_query(&query)?;
    let items = filter.apply(fetch_available(state).await?);
    tracing::debug!(count = items.len(), ?filter, "catalog listed");

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: Category) -> Product {
        Product {
            id: name.to_string(),
            name: name.to_string(),
            price: Decimal::ONE,
            image: String::new(),
            category,
            description: String::new(),
            producer: String::new(),
            unit: "unidade".into(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("Cesta de Vegetais Orgânicos", Category::Alimentos),
            product("Pão Artesanal Integral", Category::Panificados),
            product("Queijo Minas Frescal", Category::Laticinios),
            product("Suco de Uva Integral", Category::Bebidas),
        ]
    }

    fn query(category: Option<&str>, q: Option<&str>) -> CatalogQuery {
        CatalogQuery {
            category: category.map(str::to_string),
            q: q.map(str::to_string),
        }
    }

    #[test]
    fn todos_matches_everything() {
        let filter = CatalogFilter::from_query(&query(Some("todos"), None)).unwrap();
        assert_eq!(filter, CatalogFilter::default());
        assert_eq!(filter.apply(catalog()).len(), 4);
    }

    #[test]
    fn search_is_case_insensitive() {
        let filter = CatalogFilter::from_query(&query(None, Some("INTEGRAL"))).unwrap();
        let names: Vec<String> = filter.apply(catalog()).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Pão Artesanal Integral", "Suco de Uva Integral"]);
    }

    #[test]
    fn category_and_search_combine() {
        let filter = CatalogFilter::from_query(&query(Some("bebidas"), Some("integral"))).unwrap();
        let names: Vec<String> = filter.apply(catalog()).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Suco de Uva Integral"]);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = CatalogFilter::from_query(&query(Some("ferramentas"), None)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn row_defaults_fill_missing_columns() {
        let product = Product::from(CatalogRow {
            id: "9".into(),
            name: "Mel".into(),
            price: Decimal::new(2800, 2),
            image: None,
            category: None,
            description: None,
            producer: Some("Apiário Flor".into()),
            unit: None,
        });
        assert_eq!(product.category, Category::Outros);
        assert_eq!(product.unit, "unidade");
        assert_eq!(product.image, "");
    }
}
