//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use pokedex_domain::common::split_delimited;
use pokedex_domain::{
    BrowseState, BrowseView, DomainError, ElementType, QuerySpec, Record, RecordId, RecordInput,
    SortKey, ValueRange,
};

use crate::app::App;
use crate::stores::{StoreError, StoreStatus};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/records", get(list_records).post(create_record))
        .route(
            "/api/records/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .route("/api/reload", post(reload))
        .route("/api/types", get(list_types))
        .route("/api/status", get(status))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Records
// =============================================================================

/// Query string of `GET /api/records`. Absent parameters leave that part of
/// the query unconstrained.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListParams {
    search: Option<String>,
    /// Comma-separated type tags.
    types: Option<String>,
    height_min: Option<u32>,
    height_max: Option<u32>,
    weight_min: Option<u32>,
    weight_max: Option<u32>,
    /// `field-direction`, e.g. `name-asc`
    sort: Option<String>,
    page: Option<usize>,
}

impl ListParams {
    fn to_query_spec(&self) -> Result<QuerySpec, ApiError> {
        let mut spec = QuerySpec::default();

        if let Some(search) = &self.search {
            spec = spec.with_search(search.trim());
        }
        if let Some(types) = &self.types {
            spec = spec.with_types(split_delimited(types));
        }
        spec = spec
            .with_height_range(range(self.height_min, self.height_max))
            .with_weight_range(range(self.weight_min, self.weight_max));
        if let Some(sort) = &self.sort {
            let key: SortKey = sort
                .parse()
                .map_err(|e: DomainError| ApiError::BadRequest(e.to_string()))?;
            spec = spec.with_sort(key);
        }

        Ok(spec)
    }
}

fn range(min: Option<u32>, max: Option<u32>) -> ValueRange {
    let unbounded = ValueRange::unbounded();
    ValueRange::new(min.unwrap_or(unbounded.min), max.unwrap_or(unbounded.max))
}

async fn list_records(
    State(app): State<Arc<App>>,
    Query(params): Query<ListParams>,
) -> Result<Json<BrowseView>, ApiError> {
    let mut browse = BrowseState::new(params.to_query_spec()?)
        .with_page_size(app.config.page_size)
        .with_max_visible_pages(app.config.max_visible_pages);
    browse.set_page(params.page.unwrap_or(1));

    let snapshot = app.store.list().await;
    Ok(Json(browse.view(&snapshot)))
}

async fn get_record(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let id = parse_id(&id)?;
    let record = app.store.get_by_id(id).await.ok_or(ApiError::NotFound)?;
    Ok(Json(record))
}

async fn create_record(
    State(app): State<Arc<App>>,
    Json(input): Json<RecordInput>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let record = app.store.create(&input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_record(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    Json(input): Json<RecordInput>,
) -> Result<Json<Record>, ApiError> {
    let id = parse_id(&id)?;
    let record = app.store.update(id, &input).await?;
    Ok(Json(record))
}

async fn delete_record(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    app.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A route id that is not a number cannot match any record.
fn parse_id(raw: &str) -> Result<RecordId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReloadParams {
    count: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ReloadResponse {
    loaded: usize,
}

async fn reload(
    State(app): State<Arc<App>>,
    Query(params): Query<ReloadParams>,
) -> Result<Json<ReloadResponse>, ApiError> {
    let count = params.count.unwrap_or(app.config.catalog_seed_count);
    let loaded = app.store.reload(count).await.map_err(|e| match e {
        StoreError::ReloadInProgress => ApiError::Conflict(e.to_string()),
        StoreError::Fetch(_) | StoreError::Domain(_) => ApiError::BadGateway(e.to_string()),
    })?;
    Ok(Json(ReloadResponse { loaded }))
}

async fn list_types() -> Json<Vec<ElementType>> {
    Json(ElementType::ALL.to_vec())
}

async fn status(State(app): State<Arc<App>>) -> Json<StoreStatus> {
    Json(app.store.status().await)
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Conflict(String),
    BadGateway(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Domain(DomainError::NotFound { .. }) => ApiError::NotFound,
            StoreError::Domain(DomainError::Validation(msg) | DomainError::Parse(msg)) => {
                ApiError::BadRequest(msg)
            }
            StoreError::ReloadInProgress => ApiError::Conflict(e.to_string()),
            StoreError::Fetch(_) => ApiError::BadGateway(e.to_string()),
            StoreError::Domain(DomainError::Constraint(_)) => ApiError::Conflict(e.to_string()),
        }
    }
}
