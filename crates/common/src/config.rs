use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

/// Connection settings for the backing PostgreSQL store.
///
/// The URL carries both the store endpoint and the privileged credential;
/// startup fails when it is missing rather than limping along with an
/// empty connection string.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
}

/// Application configuration, loaded once at startup
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub port: u16,
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let max_connections = parse_var("DB_MAX_CONNECTIONS", 10)?;
        let port = parse_var("PORT", 8081)?;

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            store: StoreConfig {
                database_url,
                max_connections,
            },
            port,
            log_level,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidVar(name, raw)),
        Err(_) => Ok(default),
    }
}
