pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{CatalogError, ProductCatalogService};
pub use domain::{Product, ProductPayload};
pub use infra::AppConfig;
pub use storage::{InMemoryProductStore, PostgresProductStore, ProductStore};
