use crate::domain::{Product, ProductPayload};
use crate::transport::http::handlers::{health, products};
use crate::transport::http::types::ApiResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        products::create_product_handler,
        products::list_products_handler,
        products::get_product_handler,
        products::update_product_handler,
        products::delete_product_handler,
        products::check_stock_handler,
        products::sorted_products_handler
    ),
    components(schemas(ApiResponse, Product, ProductPayload)),
    tags(
        (name = "products", description = "Product catalog CRUD, stock check and price-sorted listing"),
        (name = "health", description = "Liveness and storage reachability")
    )
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/products",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route("/products/sorted", get(products::sorted_products_handler))
        .route(
            "/products/:id",
            get(products::get_product_handler)
                .put(products::update_product_handler)
                .delete(products::delete_product_handler),
        )
        .route("/products/:id/stock", get(products::check_stock_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
