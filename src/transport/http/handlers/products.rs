use crate::domain::ProductPayload;
use crate::transport::http::handlers::common::{
    catalog_error_response, path_id_response, stock_query_response,
};
use crate::transport::http::types::{json_422, AppState, StockQuery};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

const PAYLOAD_SHAPE: &str =
    "{\"name\": string, \"description\"?: string, \"price\": number, \"quantity\": integer}";

#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = crate::domain::Product),
        (status = 400, description = "Invalid field values", body = crate::transport::http::types::ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = crate::transport::http::types::ApiResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(v) => v,
        Err(e) => return json_422(e, PAYLOAD_SHAPE).into_response(),
    };

    match state.catalog.create(payload).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "All products", body = [crate::domain::Product]),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn list_products_handler(State(state): State<AppState>) -> Response {
    match state.catalog.list_all().await {
        Ok(products) => Json(products).into_response(),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = crate::domain::Product),
        (status = 400, description = "Invalid id", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Product not found (empty body)"),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(v) => v,
        Err(e) => return path_id_response(e),
    };

    match state.catalog.get_by_id(id).await {
        Ok(product) => Json(product).into_response(),
        Err(e) => catalog_error_response(e),
    }
}

/// Responds with the submitted payload, not the stored row.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated; echoes the submitted payload", body = ProductPayload),
        (status = 400, description = "Invalid id or field values", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Product not found (empty body)"),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = crate::transport::http::types::ApiResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(v) => v,
        Err(e) => return path_id_response(e),
    };
    let Json(payload) = match payload {
        Ok(v) => v,
        Err(e) => return json_422(e, PAYLOAD_SHAPE).into_response(),
    };

    match state.catalog.update(id, payload).await {
        Ok(echoed) => Json(echoed).into_response(),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Invalid id", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Product not found (empty body)"),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(v) => v,
        Err(e) => return path_id_response(e),
    };

    match state.catalog.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}/stock",
    tag = "products",
    params(
        ("id" = i64, Path, description = "Product id"),
        StockQuery
    ),
    responses(
        (status = 200, description = "Whether at least `count` units are in stock", body = bool),
        (status = 400, description = "Invalid id or missing/invalid count", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Product not found (empty body)"),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn check_stock_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<StockQuery>, QueryRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(v) => v,
        Err(e) => return path_id_response(e),
    };
    let Query(query) = match query {
        Ok(v) => v,
        Err(e) => return stock_query_response(e),
    };

    match state.catalog.check_stock(id, query.count).await {
        Ok(available) => Json(available).into_response(),
        Err(e) => catalog_error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/products/sorted",
    tag = "products",
    responses(
        (status = 200, description = "All products, cheapest first", body = [crate::domain::Product]),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn sorted_products_handler(State(state): State<AppState>) -> Response {
    match state.catalog.list_sorted_by_price().await {
        Ok(products) => Json(products).into_response(),
        Err(e) => catalog_error_response(e),
    }
}
