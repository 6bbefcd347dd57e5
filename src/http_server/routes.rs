//! String endpoints
//!
//! Handlers are generic over the repository so the same router serves the
//! file-backed store in production and the in-memory one in tests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::repository::StringRepository;
use crate::service::StringService;

use super::errors::ApiError;
use super::params::parse_filter;
use super::response::{HealthResponse, ListResponse, NaturalLanguageResponse, StringResponse};

/// Shared handler state
type ServiceState<R> = Arc<StringService<R>>;

/// Build the router for the string endpoints.
pub fn string_routes<R: StringRepository + 'static>(service: ServiceState<R>) -> Router {
    Router::new()
        .route(
            "/strings",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/strings/filter-by-natural-language",
            get(natural_language_handler::<R>),
        )
        .route(
            "/strings/:value",
            get(get_handler::<R>).delete(delete_handler::<R>),
        )
        .with_state(service)
}

/// Health check routes
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    (StatusCode::OK, Json(response))
}

/// `POST /strings` — analyze and store a new value.
///
/// The body is inspected manually rather than deserialized into a typed
/// struct so a missing `value` and a wrongly-typed `value` map to different
/// status codes.
async fn create_handler<R: StringRepository + 'static>(
    State(service): State<ServiceState<R>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<StringResponse>), ApiError> {
    let value = match body.get("value") {
        None | Some(Value::Null) => return Err(ApiError::InvalidBody),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(ApiError::InvalidValueType),
    };

    let record = service.create(&value)?;
    Ok((StatusCode::CREATED, Json(StringResponse::from(record))))
}

/// `GET /strings` — list records matching a structured filter.
async fn list_handler<R: StringRepository + 'static>(
    State(service): State<ServiceState<R>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ListResponse>, ApiError> {
    let filter = parse_filter(&params)?;
    let records = service.list(&filter)?;
    Ok(Json(ListResponse::new(records, filter)))
}

/// `GET /strings/filter-by-natural-language` — list via a free-text query.
async fn natural_language_handler<R: StringRepository + 'static>(
    State(service): State<ServiceState<R>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<NaturalLanguageResponse>, ApiError> {
    let query = params
        .get("query")
        .ok_or_else(|| ApiError::MissingParam("query".to_string()))?;

    let (records, interpreted) = service.list_by_natural_language(query)?;
    Ok(Json(NaturalLanguageResponse::new(records, interpreted)))
}

/// `GET /strings/{value}` — look up a record by its value's digest.
async fn get_handler<R: StringRepository + 'static>(
    State(service): State<ServiceState<R>>,
    Path(value): Path<String>,
) -> Result<Json<StringResponse>, ApiError> {
    let record = service.get(&value)?;
    Ok(Json(StringResponse::from(record)))
}

/// `DELETE /strings/{value}` — remove a record by its value's digest.
async fn delete_handler<R: StringRepository + 'static>(
    State(service): State<ServiceState<R>>,
    Path(value): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete(&value)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;

    #[test]
    fn test_router_builds() {
        let service = Arc::new(StringService::new(MemoryRepository::new()));
        let _router = string_routes(service).merge(health_routes());
    }
}
