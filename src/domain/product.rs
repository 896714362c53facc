//! The `Product` record and the payload clients send to create or update one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Digits kept after the decimal point (matches the `NUMERIC(19, 4)` column).
pub const PRICE_MAX_SCALE: u32 = 4;

/// Prices must stay strictly below this (10^15) to fit the stored column.
pub fn price_upper_bound() -> Decimal {
    Decimal::from(1_000_000_000_000_000_i64)
}

/// Checks that `price` is non-negative and representable without rounding.
pub fn check_price(price: Decimal) -> Result<(), String> {
    if price < Decimal::ZERO {
        return Err(format!("Product price cannot be negative (got {})", price));
    }
    if price.scale() > PRICE_MAX_SCALE {
        return Err(format!(
            "Product price allows at most {} decimal places (got {})",
            PRICE_MAX_SCALE, price
        ));
    }
    if price >= price_upper_bound() {
        return Err(format!(
            "Product price must be below {} (got {})",
            price_upper_bound(),
            price
        ));
    }
    Ok(())
}

/// A stored product. `id` is assigned by storage on creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 1.5)]
    pub price: Decimal,
    pub quantity: i32,
}

impl Product {
    /// True when at least `count` units are in stock.
    pub fn has_stock(&self, count: i32) -> bool {
        self.quantity >= count
    }
}

/// Request body for create and update.
///
/// A client may send an `id`; it is never written to storage, but update echoes
/// the payload back verbatim, so it is kept rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 1.5)]
    pub price: Decimal,
    pub quantity: i32,
}

impl ProductPayload {
    pub fn new(name: impl Into<String>, price: Decimal, quantity: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            price,
            quantity,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Rejects blank names, negative quantities, and prices that are negative or
    /// would not be stored exactly (see [`check_price`]).
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product must have a non-empty name".to_string());
        }
        check_price(self.price)?;
        if self.quantity < 0 {
            return Err(format!(
                "Product quantity cannot be negative (got {})",
                self.quantity
            ));
        }
        Ok(())
    }

    /// Builds the stored record for this payload under a storage-assigned id.
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Columns a product listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Name,
    Price,
    Quantity,
}

impl SortField {
    /// Whitelisted column name, safe to splice into SQL.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Quantity => "quantity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}
