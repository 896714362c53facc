use product_catalog::infra::telemetry;
use product_catalog::{AppConfig, PostgresProductStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           DB_MAX_CONNECTIONS, LOG_FORMAT, RUST_LOG\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let config = AppConfig::from_env()?;
    telemetry::init(config.log_format);

    let database_url = config.require_database_url()?;
    tracing::info!(max_connections = config.db_max_connections, "Preflight: connecting to database");

    // Connecting also runs the CREATE TABLE IF NOT EXISTS for `products`.
    let store = PostgresProductStore::connect(database_url, config.db_max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("Database is not reachable: {}", e))?;

    let rows = store.count().await?;
    tracing::info!(rows, "Preflight: products table is present");

    tracing::info!("Preflight OK");
    Ok(())
}
