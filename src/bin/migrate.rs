use greenmarket::{
    config::AppConfig,
    db::{create_pool, orm_from_pool, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();
    let config = AppConfig::from_env()?;
    let orm = orm_from_pool(create_pool(&config.database_url).await?);
    run_migrations(&orm).await?;
    tracing::info!("migrations applied");
    Ok(())
}
