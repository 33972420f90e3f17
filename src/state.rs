use std::sync::Arc;

use crate::{
    cart::CartStore,
    checkout::{
        CheckoutComposer,
        directory::PgSellerDirectory,
        launcher::{CommandLauncher, DeepLinkLauncher},
    },
    config::AppConfig,
    db::{DbPool, OrmConn, orm_from_pool},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub cart: CartStore,
    pub checkout: Arc<CheckoutComposer>,
}

impl AppState {
    pub fn new(pool: DbPool, config: &AppConfig) -> Self {
        let launcher = Arc::new(CommandLauncher::new(config.deep_link_opener.clone()));
        Self::with_launcher(pool, launcher, &config.phone_country_code)
    }

    /// Builds the state with the Postgres seller directory and a custom
    /// deep-link launcher.
    pub fn with_launcher(
        pool: DbPool,
        launcher: Arc<dyn DeepLinkLauncher>,
        country_code: &str,
    ) -> Self {
        let directory = Arc::new(PgSellerDirectory::new(pool.clone()));
        Self {
            orm: orm_from_pool(pool.clone()),
            pool,
            cart: CartStore::new(),
            checkout: Arc::new(CheckoutComposer::new(directory, launcher, country_code)),
        }
    }
}
