//! PostgreSQL-backed product store.

use crate::domain::{OrderDirection, Product, ProductPayload, SortField};
use crate::storage::{ProductStore, StorageResult};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

const PRODUCT_COLUMNS: &str = "id, name, description, price, quantity";

/// Product store over a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool and makes sure the `products` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> StorageResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS products (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                price NUMERIC(19, 4) NOT NULL,
                quantity INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn count(&self) -> StorageResult<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

fn row_to_product(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        quantity: row.try_get("quantity")?,
    })
}

fn rows_to_products(rows: Vec<PgRow>) -> Result<Vec<Product>, sqlx::Error> {
    rows.iter().map(row_to_product).collect()
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn create(&self, payload: &ProductPayload) -> StorageResult<Product> {
        let sql = format!(
            "INSERT INTO products (name, description, price, quantity)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            PRODUCT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&payload.name)
            .bind(&payload.description)
            .bind(payload.price)
            .bind(payload.quantity)
            .fetch_one(&self.pool)
            .await?;
        Ok(row_to_product(&row)?)
    }

    async fn find_all(&self) -> StorageResult<Vec<Product>> {
        let sql = format!("SELECT {} FROM products ORDER BY id ASC", PRODUCT_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows_to_products(rows)?)
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_product).transpose()?)
    }

    async fn update(&self, id: i64, payload: &ProductPayload) -> StorageResult<Option<Product>> {
        let sql = format!(
            "UPDATE products
             SET name = $1, description = $2, price = $3, quantity = $4
             WHERE id = $5
             RETURNING {}",
            PRODUCT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&payload.name)
            .bind(&payload.description)
            .bind(payload.price)
            .bind(payload.quantity)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_product).transpose()?)
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_ordered_by(
        &self,
        field: SortField,
        direction: OrderDirection,
    ) -> StorageResult<Vec<Product>> {
        // Column and direction come from closed enums, never from user text.
        let sql = format!(
            "SELECT {} FROM products ORDER BY {} {}, id ASC",
            PRODUCT_COLUMNS,
            field.column(),
            direction.as_sql()
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows_to_products(rows)?)
    }

    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
