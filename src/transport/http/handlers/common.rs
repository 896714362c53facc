use crate::app::CatalogError;
use crate::transport::http::types::{bad_request, ApiResponse};
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Maps a catalog failure onto the HTTP surface. Not-found is a bare 404.
pub fn catalog_error_response(err: CatalogError) -> Response {
    match err {
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
        CatalogError::Validation(msg) => bad_request(msg).into_response(),
        CatalogError::Storage(e) => {
            tracing::error!(error = %e, "storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
                .into_response()
        }
    }
}

pub fn path_id_response(err: PathRejection) -> Response {
    bad_request(format!("Invalid product id: {}", err)).into_response()
}

pub fn stock_query_response(err: QueryRejection) -> Response {
    bad_request(format!(
        "Invalid query: {} (expected: ?count=<integer>)",
        err
    ))
    .into_response()
}
