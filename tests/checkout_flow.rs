use std::sync::Arc;

use greenmarket::{
    checkout::{CheckoutOutcome, launcher::MockDeepLinkLauncher},
    db::{create_pool, orm_from_pool, run_migrations},
    dto::{
        profile::UpdateProfileRequest,
        stock::{PublishStockRequest, UpdateStockRequest},
    },
    error::AppError,
    middleware::session::SessionUser,
    routes::params::CatalogQuery,
    services::{catalog_service, profile_service, stock_service},
    state::AppState,
};
use rust_decimal::Decimal;
use uuid::Uuid;

// Integration flow: producer publishes stock -> consumer finds it in the
// catalog -> adds it to the cart -> checkout hands the order to WhatsApp;
// producer then edits profile and stock.
#[tokio::test]
async fn publish_browse_checkout_and_manage_stock_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let pool = create_pool(&database_url).await?;
    run_migrations(&orm_from_pool(pool.clone())).await?;

    let mut launcher = MockDeepLinkLauncher::new();
    launcher
        .expect_open()
        .withf(|url| url.starts_with("whatsapp://send?phone=5511999999999&text="))
        .times(1)
        .returning(|_| Ok(()));
    launcher
        .expect_open()
        .withf(|url| url.starts_with("whatsapp://send?phone=5521988887777&text="))
        .times(1)
        .returning(|_| Ok(()));
    let state = AppState::with_launcher(pool, Arc::new(launcher), "55");

    let suffix = Uuid::new_v4().simple().to_string();
    let store_name = format!("Sítio Teste {suffix}");
    let producer = SessionUser {
        user_id: create_producer(&state, &store_name, &format!("ana+{suffix}")).await?,
    };
    let rival = SessionUser {
        user_id: create_producer(&state, &format!("Rival {suffix}"), &format!("rival+{suffix}"))
            .await?,
    };
    let item_name = format!("Geleia de Morango {suffix}");
    let item_id = create_item(&state, &item_name).await?;

    let published = stock_service::publish_stock(
        &state,
        &producer,
        PublishStockRequest {
            item_id,
            price: "18,90".into(),
            quantity: "12".into(),
        },
    )
    .await?
    .data
    .expect("published stock");

    let catalog = search(&state, &suffix).await?;
    assert_eq!(catalog.len(), 1);
    let product = catalog[0].clone();
    assert_eq!(product.id, published.id.to_string());
    assert_eq!(product.producer, store_name);
    assert_eq!(product.unit, "pote 300g");

    state.cart.add_to_cart(product.clone());
    state.cart.add_to_cart(product);
    state.cart.open_cart();

    let outcome = state.checkout.checkout(&state.cart).await?;
    let CheckoutOutcome::HandedOff(receipt) = outcome else {
        panic!("expected a handoff");
    };
    assert_eq!(receipt.phone, "5511999999999");
    assert_eq!(receipt.recipient.as_deref(), Some(store_name.as_str()));
    assert!(receipt.message.contains(&format!("2x {item_name}")));
    assert!(receipt.message.contains("Total: R$ 37.80"));

    let cart = state.cart.snapshot();
    assert!(!cart.is_open());
    assert_eq!(cart.quantity_of(&published.id.to_string()), 2);

    // New phone on the profile is used by the next checkout.
    let profile = profile_service::update_profile(
        &state,
        &producer,
        UpdateProfileRequest {
            name: "Ana Souza".into(),
            phone: Some("(21) 98888-7777".into()),
            address: None,
            store_name: Some(store_name.clone()),
            cnpj: Some("12.345.678/0001-90".into()),
            pickup_address: Some("Feira da Praça, banca 4".into()),
        },
    )
    .await?
    .data
    .expect("updated profile");
    assert_eq!(profile.user.phone.as_deref(), Some("(21) 98888-7777"));

    let profile = profile_service::get_profile(&state, &producer)
        .await?
        .data
        .expect("profile");
    let producer_row = profile.producer.expect("producer row");
    assert_eq!(producer_row.store_name.as_deref(), Some(store_name.as_str()));
    assert_eq!(producer_row.cnpj.as_deref(), Some("12.345.678/0001-90"));

    let CheckoutOutcome::HandedOff(receipt) = state.checkout.checkout(&state.cart).await? else {
        panic!("expected a handoff");
    };
    assert_eq!(receipt.phone, "5521988887777");

    // Another producer cannot touch this entry.
    let denied = stock_service::update_stock(
        &state,
        &rival,
        published.id,
        UpdateStockRequest {
            price: Some("1,00".into()),
            quantity: None,
            available: None,
        },
    )
    .await;
    assert!(matches!(denied, Err(AppError::Forbidden)));
    let denied = stock_service::delete_stock(&state, &rival, published.id).await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    let updated = stock_service::update_stock(
        &state,
        &producer,
        published.id,
        UpdateStockRequest {
            price: Some("21,50".into()),
            quantity: None,
            available: Some(false),
        },
    )
    .await?
    .data
    .expect("updated stock");
    assert_eq!(updated.unit_price, Decimal::new(2150, 2));
    assert_eq!(updated.quantity, Decimal::from(12));
    assert!(!updated.available);
    assert!(search(&state, &suffix).await?.is_empty());

    let mine = stock_service::list_my_stock(&state, &producer)
        .await?
        .data
        .expect("stock list");
    assert_eq!(mine.items.len(), 1);

    stock_service::delete_stock(&state, &producer, published.id).await?;
    let mine = stock_service::list_my_stock(&state, &producer)
        .await?
        .data
        .expect("stock list");
    assert!(mine.items.is_empty());

    let gone = stock_service::delete_stock(&state, &producer, published.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    Ok(())
}

async fn search(
    state: &AppState,
    needle: &str,
) -> anyhow::Result<Vec<greenmarket::models::Product>> {
    let list = catalog_service::list_products(
        state,
        CatalogQuery {
            category: Some("alimentos".into()),
            q: Some(needle.to_string()),
        },
    )
    .await?
    .data
    .expect("catalog");
    Ok(list.items)
}

async fn create_producer(state: &AppState, store_name: &str, email_user: &str) -> anyhow::Result<i64> {
    let (user_id,): (i64,) = sqlx::query_as(
        "INSERT INTO usuarios (nome, email, telefone, tipo_usuario) VALUES ($1, $2, $3, 'produtor') RETURNING id",
    )
    .bind("Ana Souza")
    .bind(format!("{email_user}@example.com"))
    .bind("(11) 99999-9999")
    .fetch_one(&state.pool)
    .await?;

    sqlx::query("INSERT INTO produtores (usuario_id, nome_produtor) VALUES ($1, $2)")
        .bind(user_id)
        .bind(store_name)
        .execute(&state.pool)
        .await?;
    Ok(user_id)
}

async fn create_item(state: &AppState, name: &str) -> anyhow::Result<i64> {
    let (unit_id,): (i64,) = sqlx::query_as(
        "INSERT INTO tipos_item (nome) VALUES ('pote 300g') ON CONFLICT (nome) DO UPDATE SET nome = EXCLUDED.nome RETURNING id",
    )
    .fetch_one(&state.pool)
    .await?;

    let (item_id,): (i64,) = sqlx::query_as(
        "INSERT INTO itens (nome, categoria, tipo_item_id) VALUES ($1, 'alimentos', $2) RETURNING id",
    )
    .bind(name)
    .bind(unit_id)
    .fetch_one(&state.pool)
    .await?;
    Ok(item_id)
}
