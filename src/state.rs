//! Application state for Flowerbed.
//!
//! Contains the shared state that is passed to all handlers.

use crate::db::DbPool;
use crate::services::FlowerService;
use crate::{config, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DbPool,
    /// Planting and lookup of flowers.
    pub flowers: FlowerService,
}

impl AppState {
    /// Create a new application state from the global configuration.
    pub async fn new() -> Result<Self> {
        let config = config::config();

        let db = crate::db::init_pool(&config.database.path, config.database.max_connections)
            .await?;
        crate::db::initialize_schema(&db).await?;

        Ok(Self::with_pool(db))
    }

    /// Build state around an already initialized pool.
    pub fn with_pool(db: DbPool) -> Self {
        let flowers = FlowerService::new(db.clone());
        Self { db, flowers }
    }
}
