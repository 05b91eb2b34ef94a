//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub receipts_count: usize,
    /// "file" or "memory"
    pub storage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir_exists: Option<bool>,
}

/// GET /health (and /api/health) - Liveness plus storage/frontend diagnostics
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let storage_path = state.store.path().map(|p| p.display().to_string());
    let static_dir = state.config.static_dir.as_ref();

    Json(HealthResponse {
        status: "ok",
        receipts_count: state.store.len(),
        storage: if storage_path.is_some() { "file" } else { "memory" },
        storage_path,
        static_dir: static_dir.map(|d| d.display().to_string()),
        static_dir_exists: static_dir.map(|d| d.exists()),
    })
}
