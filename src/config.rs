use std::env;

use crate::checkout::message::DEFAULT_COUNTRY_CODE;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub phone_country_code: String,
    pub deep_link_opener: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let phone_country_code = env::var("PHONE_COUNTRY_CODE")
            .ok()
            .filter(|code| !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());
        let deep_link_opener =
            env::var("DEEP_LINK_OPENER").unwrap_or_else(|_| "xdg-open".to_string());
        Ok(Self {
            port,
            database_url,
            host,
            phone_country_code,
            deep_link_opener,
        })
    }
}
