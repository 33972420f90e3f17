use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    ActiveValue::NotSet,
};

use crate::{
    dto::{
        products::CatalogItemList,
        stock::{PublishStockRequest, StockList, UpdateStockRequest},
    },
    entity::{
        estoque::{ActiveModel as StockActive, Column as StockCol, Entity as Estoque, Model as StockModel},
        itens::{Column as ItemCol, Entity as Itens},
        produtores::{Column as ProducerCol, Entity as Produtores, Model as ProducerModel},
        tipos_item::Entity as TiposItem,
    },
    error::{AppError, AppResult},
    middleware::session::SessionUser,
    models::{CatalogItem, Category, StockEntry, parse_amount},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Catalog items a producer can publish stock for, with their unit of sale.
pub async fn list_catalog_items(state: &AppState) -> AppResult<ApiResponse<CatalogItemList>> {
    let items: Vec<CatalogItem> = Itens::find()
        .find_also_related(TiposItem)
        .order_by_asc(ItemCol::Nome)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(item, unit)| CatalogItem {
            id: item.id,
            category: Category::from_db(item.categoria.as_deref()),
            name: item.nome,
            unit: unit.map(|u| u.nome),
        })
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Catalog items", CatalogItemList { items }, Some(meta)))
}

pub async fn list_my_stock(
    state: &AppState,
    session: &SessionUser,
) -> AppResult<ApiResponse<StockList>> {
    let producer = producer_of(state, session).await?;
    let items: Vec<StockEntry> = Estoque::find()
        .filter(StockCol::ProdutorId.eq(producer.id))
        .order_by_asc(StockCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(stock_from_entity)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Stock", StockList { items }, Some(meta)))
}

pub async fn publish_stock(
    state: &AppState,
    session: &SessionUser,
    payload: PublishStockRequest,
) -> AppResult<ApiResponse<StockEntry>> {
    let unit_price = parse_amount(&payload.price)
        .map_err(|err| AppError::BadRequest(format!("price: {err}")))?;
    let quantity = parse_amount(&payload.quantity)
        .map_err(|err| AppError::BadRequest(format!("quantity: {err}")))?;

    let producer = producer_of(state, session).await?;
    if Itens::find_by_id(payload.item_id).one(&state.orm).await?.is_none() {
        return Err(AppError::BadRequest("item not found".to_string()));
    }

    let entry = StockActive {
        id: NotSet,
        produtor_id: Set(producer.id),
        item_id: Set(payload.item_id),
        preco_unitario: Set(unit_price),
        quantidade: Set(quantity),
        disponivel: Set(true),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(stock_id = entry.id, producer_id = producer.id, item_id = entry.item_id, "stock published");

    Ok(ApiResponse::success(
        "Product published",
        stock_from_entity(entry),
        Some(Meta::empty()),
    ))
}

pub async fn update_stock(
    state: &AppState,
    session: &SessionUser,
    id: i64,
    payload: UpdateStockRequest,
) -> AppResult<ApiResponse<StockEntry>> {
    let existing = owned_stock(state, session, id).await?;

    let mut active: StockActive = existing.into();
    if let Some(price) = payload.price {
        let price = parse_amount(&price)
            .map_err(|err| AppError::BadRequest(format!("price: {err}")))?;
        active.preco_unitario = Set(price);
    }
    if let Some(quantity) = payload.quantity {
        let quantity = parse_amount(&quantity)
            .map_err(|err| AppError::BadRequest(format!("quantity: {err}")))?;
        active.quantidade = Set(quantity);
    }
    if let Some(available) = payload.available {
        active.disponivel = Set(available);
    }

    let entry = active.update(&state.orm).await?;
    tracing::info!(stock_id = entry.id, "stock updated");

    Ok(ApiResponse::success(
        "Updated",
        stock_from_entity(entry),
        Some(Meta::empty()),
    ))
}

pub async fn delete_stock(
    state: &AppState,
    session: &SessionUser,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let existing = owned_stock(state, session, id).await?;
    let result = Estoque::delete_by_id(existing.id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(stock_id = id, "stock removed");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn producer_of(state: &AppState, session: &SessionUser) -> AppResult<ProducerModel> {
    Produtores::find()
        .filter(ProducerCol::UsuarioId.eq(session.user_id))
        .one(&state.orm)
        .await?
        .ok_or(AppError::Forbidden)
}

/// Loads a stock entry and checks it belongs to the session's producer.
async fn owned_stock(state: &AppState, session: &SessionUser, id: i64) -> AppResult<StockModel> {
    let producer = producer_of(state, session).await?;
    let entry = Estoque::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    if entry.produtor_id != producer.id {
        return Err(AppError::Forbidden);
    }
    Ok(entry)
}

fn stock_from_entity(model: StockModel) -> StockEntry {
    StockEntry {
        id: model.id,
        producer_id: model.produtor_id,
        item_id: model.item_id,
        unit_price: model.preco_unitario,
        quantity: model.quantidade,
        available: model.disponivel,
    }
}
