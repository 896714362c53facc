//! Domain types for the product catalog.

pub mod product;

pub use product::{check_price, OrderDirection, Product, ProductPayload, SortField};
