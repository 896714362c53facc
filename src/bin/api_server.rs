// src/bin/api_server.rs

use product_catalog::infra::telemetry;
use product_catalog::storage::connect_store;
use product_catalog::transport;
use product_catalog::{AppConfig, ProductCatalogService};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    telemetry::init(config.log_format);

    // --- Storage Initialization ---
    tracing::info!(backend = ?config.storage_backend, "Initializing product store");
    let store = connect_store(&config).await?;

    // --- Service Initialization ---
    let catalog = ProductCatalogService::new(store);
    catalog.health().await?;
    let app_state = transport::http::AppState::new(catalog);
    tracing::info!("ProductCatalogService initialized");

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let swagger = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi());
    let app = transport::http::create_router(app_state)
        .merge(swagger)
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "API server listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received (Ctrl+C), draining connections");
}
