//! The Product Catalog Service.
//!
//! Sits between the HTTP layer and the [`ProductStore`]. Every operation is one
//! storage call plus the lookup/not-found decision around it; there is no
//! in-process state shared between requests.

use crate::domain::{OrderDirection, Product, ProductPayload, SortField};
use crate::storage::{ProductStore, StorageError};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(i64),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Clone)]
pub struct ProductCatalogService {
    store: Arc<dyn ProductStore>,
}

impl ProductCatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Persists a new product and returns it with its storage-assigned id.
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, payload: ProductPayload) -> CatalogResult<Product> {
        tracing::info!(?payload, "Adding product");
        payload.validate().map_err(CatalogError::Validation)?;
        let product = self.store.create(&payload).await?;
        tracing::info!(id = product.id, "Added product");
        Ok(product)
    }

    #[tracing::instrument(skip_all)]
    pub async fn list_all(&self) -> CatalogResult<Vec<Product>> {
        tracing::info!("Fetching all products");
        let products = self.store.find_all().await?;
        tracing::info!(count = products.len(), "Fetched products");
        Ok(products)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> CatalogResult<Product> {
        tracing::info!("Fetching product");
        let product = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;
        tracing::info!(?product, "Fetched product");
        Ok(product)
    }

    /// Overwrites the stored fields of product `id` with `payload`.
    ///
    /// Returns the payload exactly as submitted, not a re-read of the stored row.
    /// Any `id` inside the payload is ignored for the write and echoed back as-is.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: i64, payload: ProductPayload) -> CatalogResult<ProductPayload> {
        tracing::info!("Updating product");
        payload.validate().map_err(CatalogError::Validation)?;
        let updated = self
            .store
            .update(id, &payload)
            .await?
            .ok_or(CatalogError::NotFound(id))?;
        tracing::info!(product = ?updated, "Updated product");
        Ok(payload)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> CatalogResult<()> {
        tracing::info!("Deleting product");
        if self.store.delete_by_id(id).await? {
            tracing::info!("Deleted product");
            Ok(())
        } else {
            tracing::warn!("No product found");
            Err(CatalogError::NotFound(id))
        }
    }

    /// True when product `id` has at least `count` units in stock.
    #[tracing::instrument(skip(self))]
    pub async fn check_stock(&self, id: i64, count: i32) -> CatalogResult<bool> {
        tracing::info!("Checking stock");
        let product = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;
        let available = product.has_stock(count);
        tracing::info!(available, quantity = product.quantity, "Stock checked");
        Ok(available)
    }

    #[tracing::instrument(skip_all)]
    pub async fn list_sorted_by_price(&self) -> CatalogResult<Vec<Product>> {
        tracing::info!("Fetching products sorted by price");
        let products = self
            .store
            .find_ordered_by(SortField::Price, OrderDirection::Asc)
            .await?;
        for product in &products {
            tracing::debug!(?product);
        }
        Ok(products)
    }

    pub async fn health(&self) -> CatalogResult<()> {
        self.store.ping().await?;
        Ok(())
    }
}
