//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::patch::merge_patch;
use crate::cache::CacheHandle;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, ClearResponse, ExistsResponse, GetResponse, HealthResponse, InvalidateResponse,
    KeysResponse, SetRequest, SetResponse, StatsResponse, SyncRequest, SyncResponse,
};

/// Application state shared across all handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// Shared cache handle
    pub cache: CacheHandle,
}

impl AppState {
    pub fn new(cache: CacheHandle) -> Self {
        Self { cache }
    }

    /// Creates a new AppState with an empty cache configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheHandle::with_default_ttl(config.default_ttl()))
    }
}

fn checked_key(key: String) -> Result<String> {
    match validate_key(&key) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(key),
    }
}

/// Handler for PUT /cache/:key
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    let key = checked_key(key)?;
    let ttl = req.ttl();

    state.cache.set(key.clone(), req.value, ttl).await;

    Ok(Json(SetResponse::new(key)))
}

/// Handler for GET /cache/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let key = checked_key(key)?;

    match state.cache.get(&key).await {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /cache/:key/exists
pub async fn exists_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ExistsResponse>> {
    let key = checked_key(key)?;
    let exists = state.cache.has(&key).await;

    Ok(Json(ExistsResponse { key, exists }))
}

/// Handler for PATCH /cache/:key
///
/// Merges the patch into the cached document and refreshes its timestamp.
/// A missing key is reported with `synced: false`, never created.
pub async fn sync_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SyncRequest>,
) -> Result<Json<SyncResponse>> {
    let key = checked_key(key)?;
    let synced = state
        .cache
        .sync(&key, |current| merge_patch(current, &req.patch))
        .await;

    Ok(Json(SyncResponse { key, synced }))
}

/// Handler for DELETE /cache/:key
///
/// Idempotent: deleting an absent key succeeds with `removed: false`.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    let key = checked_key(key)?;
    let removed = state.cache.invalidate(&key).await;

    Ok(Json(InvalidateResponse { key, removed }))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.clear(None).await;
    Json(ClearResponse { cleared })
}

/// Handler for GET /cache
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    Json(KeysResponse {
        keys: state.cache.live_keys().await,
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
