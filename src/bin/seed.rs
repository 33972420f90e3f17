use greenmarket::{config::AppConfig, db::create_pool};
use rust_decimal::Decimal;

struct SeedItem {
    name: &'static str,
    description: &'static str,
    category: &'static str,
    unit: &'static str,
    image: &'static str,
    price: Decimal,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let consumer_id = ensure_user(&pool, "Maria Silva", "maria@silva.com", None, "consumidor").await?;
    let producer_user_id = ensure_user(
        &pool,
        "João Pereira",
        "joao@fazendaverdevida.com",
        Some("(11) 99999-9999"),
        "produtor",
    )
    .await?;
    let producer_id = ensure_producer(&pool, producer_user_id, "Fazenda Verde Vida").await?;
    seed_stock(&pool, producer_id).await?;

    tracing::info!(consumer_id, producer_user_id, producer_id, "seed completed");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    phone: Option<&str>,
    user_type: &str,
) -> anyhow::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO usuarios (nome, email, telefone, tipo_usuario)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET tipo_usuario = EXCLUDED.tipo_usuario
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(user_type)
    .fetch_one(pool)
    .await?;

    tracing::info!(email, user_type, id, "ensured user");
    Ok(id)
}

async fn ensure_producer(pool: &sqlx::PgPool, user_id: i64, store_name: &str) -> anyhow::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO produtores (usuario_id, nome_produtor)
        VALUES ($1, $2)
        ON CONFLICT (usuario_id) DO UPDATE SET nome_produtor = EXCLUDED.nome_produtor
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(store_name)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn seed_stock(pool: &sqlx::PgPool, producer_id: i64) -> anyhow::Result<()> {
    let items = [
        SeedItem {
            name: "Cesta de Vegetais Orgânicos",
            description: "Cesta variada com vegetais frescos e orgânicos da estação",
            category: "alimentos",
            unit: "cesta",
            image: "https://images.unsplash.com/photo-1554223745-ad862492c213",
            price: Decimal::new(4590, 2),
        },
        SeedItem {
            name: "Pão Artesanal Integral",
            description: "Pão integral feito com farinha orgânica e fermentação natural",
            category: "panificados",
            unit: "unidade",
            image: "https://images.unsplash.com/photo-1555932450-31a8aec2adf1",
            price: Decimal::new(1250, 2),
        },
        SeedItem {
            name: "Mel Orgânico Silvestre",
            description: "Mel puro de flores silvestres",
            category: "outros",
            unit: "pote 500g",
            image: "https://images.unsplash.com/photo-1692797178143-659c48c34135",
            price: Decimal::new(2800, 2),
        },
    ];

    for item in items {
        let (unit_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO tipos_item (nome) VALUES ($1)
            ON CONFLICT (nome) DO UPDATE SET nome = EXCLUDED.nome
            RETURNING id
            "#,
        )
        .bind(item.unit)
        .fetch_one(pool)
        .await?;

        let (item_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO itens (nome, descricao, categoria, imagem_url, tipo_item_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (nome) DO UPDATE SET descricao = EXCLUDED.descricao
            RETURNING id
            "#,
        )
        .bind(item.name)
        .bind(item.description)
        .bind(item.category)
        .bind(item.image)
        .bind(unit_id)
        .fetch_one(pool)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO estoque (produtor_id, item_id, preco_unitario, quantidade, disponivel)
            SELECT $1, $2, $3, 20, TRUE
            WHERE NOT EXISTS (SELECT 1 FROM estoque WHERE produtor_id = $1 AND item_id = $2)
            "#,
        )
        .bind(producer_id)
        .bind(item_id)
        .bind(item.price)
        .execute(pool)
        .await?;
    }

    tracing::info!(producer_id, "seeded stock");
    Ok(())
}
