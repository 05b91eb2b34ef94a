//! Receipt handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use chekscan_core::Receipt;

use crate::{AppError, AppState, SuccessResponse};

/// Response wrapper for the receipt list
#[derive(Serialize)]
pub struct ReceiptsResponse {
    pub receipts: Vec<Receipt>,
}

/// GET /api/receipts - All stored receipts, newest first
pub async fn list_receipts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReceiptsResponse>, AppError> {
    let receipts = state.store.list()?;
    Ok(Json(ReceiptsResponse { receipts }))
}

/// DELETE /api/receipts/:id - Remove a receipt
///
/// Idempotent: deleting an id that does not exist still reports success.
pub async fn delete_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.store.delete(id)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Query parameters for fetch-receipt
#[derive(Debug, Deserialize)]
pub struct FetchReceiptQuery {
    pub url: Option<String>,
}

/// Fetch-receipt outcome: a structured success flag rather than an HTTP
/// error status, so callers always get a JSON body they can inspect.
#[derive(Serialize)]
pub struct FetchReceiptResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Receipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/fetch-receipt?url=... - Scan a check-viewer page and store it
pub async fn fetch_receipt(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FetchReceiptQuery>,
) -> Result<Json<FetchReceiptResponse>, AppError> {
    let url = params
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Missing required query parameter: url"))?;

    let draft = match state.scanner.scan(&url).await {
        Ok(draft) => draft,
        Err(e) => {
            warn!(url = %url, error = %e, "Receipt fetch failed");
            return Ok(Json(FetchReceiptResponse {
                success: false,
                data: None,
                error: Some(format!("Failed to fetch receipt: {}", e)),
            }));
        }
    };

    // Storage failures are reported separately from fetch failures; the
    // extraction itself succeeded.
    match state.store.add(draft) {
        Ok(receipt) => Ok(Json(FetchReceiptResponse {
            success: true,
            data: Some(receipt),
            error: None,
        })),
        Err(e) => {
            warn!(url = %url, error = %e, "Receipt storage failed");
            Ok(Json(FetchReceiptResponse {
                success: false,
                data: None,
                error: Some(format!("Failed to store receipt: {}", e)),
            }))
        }
    }
}
