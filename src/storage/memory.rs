//! In-process product store. Ids start at 1 and are never reused.

use crate::domain::{check_price, OrderDirection, Product, ProductPayload, SortField};
use crate::storage::{ProductStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

#[derive(Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Holds prices to the same precision and range as the Postgres column.
fn check_fits(payload: &ProductPayload) -> StorageResult<()> {
    check_price(payload.price).map_err(StorageError::OutOfRange)
}

fn compare_by(field: SortField, a: &Product, b: &Product) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Price => a.price.cmp(&b.price),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, payload: &ProductPayload) -> StorageResult<Product> {
        check_fits(payload)?;
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        let product = payload.clone().into_product(id);
        inner.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn find_all(&self) -> StorageResult<Vec<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, payload: &ProductPayload) -> StorageResult<Option<Product>> {
        check_fits(payload)?;
        let mut inner = self.inner.write().await;
        let Some(existing) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        existing.name = payload.name.clone();
        existing.description = payload.description.clone();
        existing.price = payload.price;
        existing.quantity = payload.quantity;
        Ok(Some(existing.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.remove(&id).is_some())
    }

    async fn find_ordered_by(
        &self,
        field: SortField,
        direction: OrderDirection,
    ) -> StorageResult<Vec<Product>> {
        // BTreeMap iteration is id-ascending and sort_by is stable, so ties keep id order.
        let mut products = self.find_all().await?;
        products.sort_by(|a, b| match direction {
            OrderDirection::Asc => compare_by(field, a, b),
            OrderDirection::Desc => compare_by(field, b, a),
        });
        Ok(products)
    }

    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }
}
