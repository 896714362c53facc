//! Durable storage for products.
//!
//! The catalog service only talks to a [`ProductStore`]; the concrete backend is picked
//! at startup (Postgres in production, in-memory for tests and local runs).

use crate::domain::{OrderDirection, Product, ProductPayload, SortField};
use crate::infra::{AppConfig, StorageBackend};
use async_trait::async_trait;
use std::sync::Arc;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("value out of range: {0}")]
    OutOfRange(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Contract every storage backend provides. Each method maps to a single statement.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persists a new row; the store assigns the id. Any `id` on the payload is ignored.
    async fn create(&self, payload: &ProductPayload) -> StorageResult<Product>;

    /// Every stored product, ascending by id.
    async fn find_all(&self) -> StorageResult<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Product>>;

    /// Overwrites name, description, price and quantity of row `id`.
    /// Returns `None` (and changes nothing) when no such row exists.
    async fn update(&self, id: i64, payload: &ProductPayload) -> StorageResult<Option<Product>>;

    /// Returns true if a row was removed.
    async fn delete_by_id(&self, id: i64) -> StorageResult<bool>;

    /// Every stored product ordered by `field`; ties are broken by ascending id.
    async fn find_ordered_by(
        &self,
        field: SortField,
        direction: OrderDirection,
    ) -> StorageResult<Vec<Product>>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> StorageResult<()>;
}

/// Builds the store selected by `config`. For Postgres this connects the pool and
/// ensures the schema exists.
pub async fn connect_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ProductStore>> {
    let store: Arc<dyn ProductStore> = match config.storage_backend {
        StorageBackend::Postgres => Arc::new(
            PostgresProductStore::connect(config.require_database_url()?, config.db_max_connections)
                .await?,
        ),
        StorageBackend::Memory => Arc::new(InMemoryProductStore::new()),
    };
    Ok(store)
}
