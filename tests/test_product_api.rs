//! End-to-end HTTP tests: the router is served on an ephemeral port backed by the
//! in-memory store and driven with a real HTTP client.

use async_trait::async_trait;
use product_catalog::domain::{OrderDirection, Product, ProductPayload, SortField};
use product_catalog::storage::{StorageError, StorageResult};
use product_catalog::{transport, InMemoryProductStore, ProductCatalogService, ProductStore};
use reqwest::StatusCode;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A store whose database is unreachable: every call fails.
struct UnreachableStore;

fn unreachable() -> StorageError {
    StorageError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ProductStore for UnreachableStore {
    async fn create(&self, _payload: &ProductPayload) -> StorageResult<Product> {
        Err(unreachable())
    }

    async fn find_all(&self) -> StorageResult<Vec<Product>> {
        Err(unreachable())
    }

    async fn find_by_id(&self, _id: i64) -> StorageResult<Option<Product>> {
        Err(unreachable())
    }

    async fn update(&self, _id: i64, _payload: &ProductPayload) -> StorageResult<Option<Product>> {
        Err(unreachable())
    }

    async fn delete_by_id(&self, _id: i64) -> StorageResult<bool> {
        Err(unreachable())
    }

    async fn find_ordered_by(
        &self,
        _field: SortField,
        _direction: OrderDirection,
    ) -> StorageResult<Vec<Product>> {
        Err(unreachable())
    }

    async fn ping(&self) -> StorageResult<()> {
        Err(unreachable())
    }
}

async fn spawn_server() -> Result<String, Box<dyn std::error::Error>> {
    spawn_server_with(Arc::new(InMemoryProductStore::new())).await
}

async fn spawn_server_with(
    store: Arc<dyn ProductStore>,
) -> Result<String, Box<dyn std::error::Error>> {
    let catalog = ProductCatalogService::new(store);
    let router = transport::http::create_router(transport::http::AppState::new(catalog));

    // Bind to an ephemeral port so tests can run in parallel.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

#[tokio::test]
async fn pen_lifecycle_scenario() -> TestResult {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    // Create
    let resp = client
        .post(format!("{}/products", base_url))
        .json(&json!({"name": "Pen", "price": 1.50, "quantity": 10}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: JsonValue = resp.json().await?;
    assert_eq!(created["id"], json!(1));
    assert_eq!(created["name"], json!("Pen"));
    assert_eq!(created["price"].as_f64(), Some(1.5));
    assert_eq!(created["quantity"], json!(10));

    // Stock checks
    let available: bool = client
        .get(format!("{}/products/1/stock?count=5", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert!(available);
    let available: bool = client
        .get(format!("{}/products/1/stock?count=20", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert!(!available);

    // Update echoes the submitted payload
    let update_body = json!({"name": "Pen", "price": 2.00, "quantity": 3});
    let resp = client
        .put(format!("{}/products/1", base_url))
        .json(&update_body)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: JsonValue = resp.json().await?;
    assert_eq!(echoed["name"], json!("Pen"));
    assert_eq!(echoed["price"].as_f64(), Some(2.0));
    assert_eq!(echoed["quantity"], json!(3));
    assert!(echoed.get("id").is_none());

    let stored: JsonValue = client
        .get(format!("{}/products/1", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(stored["id"], json!(1));
    assert_eq!(stored["quantity"], json!(3));

    let available: bool = client
        .get(format!("{}/products/1/stock?count=5", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert!(!available);

    // Delete, then the product is gone
    let resp = client.delete(format!("{}/products/1", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client.get(format!("{}/products/1", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.text().await?, "");

    Ok(())
}

#[tokio::test]
async fn missing_product_yields_empty_404_everywhere() -> TestResult {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let responses = vec![
        client.get(format!("{}/products/42", base_url)).send().await?,
        client
            .put(format!("{}/products/42", base_url))
            .json(&json!({"name": "Ghost", "price": 1.0, "quantity": 1}))
            .send()
            .await?,
        client.delete(format!("{}/products/42", base_url)).send().await?,
        client
            .get(format!("{}/products/42/stock?count=1", base_url))
            .send()
            .await?,
    ];

    for resp in responses {
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.text().await?, "");
    }

    // The failed update must not have created anything.
    let all: Vec<JsonValue> = client
        .get(format!("{}/products", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert!(all.is_empty());
    Ok(())
}

#[tokio::test]
async fn sorted_listing_orders_by_price_ascending() -> TestResult {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    for (name, price) in [("Desk", 120.0), ("Pen", 1.5), ("Lamp", 35.25), ("Clip", 0.1)] {
        let resp = client
            .post(format!("{}/products", base_url))
            .json(&json!({"name": name, "description": "office", "price": price, "quantity": 1}))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let sorted: Vec<JsonValue> = client
        .get(format!("{}/products/sorted", base_url))
        .send()
        .await?
        .json()
        .await?;
    let names: Vec<&str> = sorted.iter().filter_map(|p| p["name"].as_str()).collect();
    assert_eq!(names, vec!["Clip", "Pen", "Lamp", "Desk"]);

    let all: Vec<JsonValue> = client
        .get(format!("{}/products", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(all.len(), sorted.len());
    assert_eq!(all[0]["description"], json!("office"));
    Ok(())
}

#[tokio::test]
async fn client_errors_are_reported_not_crashed() -> TestResult {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    // Malformed JSON
    let resp = client
        .post(format!("{}/products", base_url))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body["success"], json!(false));

    // Missing required field
    let resp = client
        .post(format!("{}/products", base_url))
        .json(&json!({"name": "Pen", "price": 1.5}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Negative values
    let resp = client
        .post(format!("{}/products", base_url))
        .json(&json!({"name": "Pen", "price": -1.0, "quantity": 1}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Non-numeric id
    let resp = client.get(format!("{}/products/abc", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Stock check without count
    let created: JsonValue = client
        .post(format!("{}/products", base_url))
        .json(&json!({"name": "Pen", "price": 1.5, "quantity": 1}))
        .send()
        .await?
        .json()
        .await?;
    let resp = client
        .get(format!("{}/products/{}/stock", base_url, created["id"]))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> TestResult {
    let base_url = spawn_server().await?;
    let resp = reqwest::get(format!("{}/health", base_url)).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("ok"));
    Ok(())
}

#[tokio::test]
async fn prices_that_cannot_be_stored_exactly_are_client_errors() -> TestResult {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/products", base_url))
        .json(&json!({"name": "Pen", "price": 1.23456, "quantity": 1}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body["success"], json!(false));

    let resp = client
        .post(format!("{}/products", base_url))
        .json(&json!({"name": "Pen", "price": 10_000_000_000_000_000_u64, "quantity": 1}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{}/products", base_url))
        .json(&json!({"name": "Pen", "price": 1.2346, "quantity": 1}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: JsonValue = resp.json().await?;
    assert_eq!(created["price"].as_f64(), Some(1.2346));
    Ok(())
}

#[tokio::test]
async fn invalid_update_is_rejected_and_leaves_row_unchanged() -> TestResult {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let created: JsonValue = client
        .post(format!("{}/products", base_url))
        .json(&json!({"name": "Pen", "price": 1.5, "quantity": 10}))
        .send()
        .await?
        .json()
        .await?;
    let url = format!("{}/products/{}", base_url, created["id"]);

    for bad in [
        json!({"name": "", "price": 2.0, "quantity": 3}),
        json!({"name": "Pen", "price": 2.0, "quantity": -3}),
        json!({"name": "Pen", "price": 2.00001, "quantity": 3}),
    ] {
        let resp = client.put(&url).json(&bad).send().await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    let stored: JsonValue = client.get(&url).send().await?.json().await?;
    assert_eq!(stored, created);

    // The payload is checked before the row is looked up.
    let resp = client
        .put(format!("{}/products/999", base_url))
        .json(&json!({"name": "Pen", "price": 2.0, "quantity": -3}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn non_integer_count_is_a_bad_request() -> TestResult {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let created: JsonValue = client
        .post(format!("{}/products", base_url))
        .json(&json!({"name": "Pen", "price": 1.5, "quantity": 10}))
        .send()
        .await?
        .json()
        .await?;

    let resp = client
        .get(format!("{}/products/{}/stock?count=abc", base_url, created["id"]))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body["success"], json!(false));
    Ok(())
}

#[tokio::test]
async fn storage_failures_surface_as_server_errors() -> TestResult {
    let base_url = spawn_server_with(Arc::new(UnreachableStore)).await?;
    let client = reqwest::Client::new();

    let responses = vec![
        client.get(format!("{}/products", base_url)).send().await?,
        client.get(format!("{}/products/sorted", base_url)).send().await?,
        client.get(format!("{}/products/1", base_url)).send().await?,
        client
            .post(format!("{}/products", base_url))
            .json(&json!({"name": "Pen", "price": 1.5, "quantity": 1}))
            .send()
            .await?,
        client
            .put(format!("{}/products/1", base_url))
            .json(&json!({"name": "Pen", "price": 1.5, "quantity": 1}))
            .send()
            .await?,
        client.delete(format!("{}/products/1", base_url)).send().await?,
        client
            .get(format!("{}/products/1/stock?count=1", base_url))
            .send()
            .await?,
    ];

    for resp in responses {
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: JsonValue = resp.json().await?;
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().is_some());
    }
    Ok(())
}

#[tokio::test]
async fn health_reports_unavailable_storage() -> TestResult {
    let base_url = spawn_server_with(Arc::new(UnreachableStore)).await?;
    let resp = reqwest::get(format!("{}/health", base_url)).await?;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["data"]["status"], json!("unhealthy"));
    Ok(())
}
