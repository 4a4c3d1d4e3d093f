use anyhow::Result;
use common::config::StoreConfig;
use read_model::{InvoiceRepository, PostgresInvoiceRepository};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn InvoiceRepository>,
}

impl AppState {
    pub async fn new(store: &StoreConfig) -> Result<Self> {
        tracing::info!("Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(store.max_connections)
            .connect(&store.database_url)
            .await?;
        tracing::info!("Database connected");

        let repository =
            Arc::new(PostgresInvoiceRepository::new(pool)) as Arc<dyn InvoiceRepository>;

        Ok(Self { repository })
    }
}
