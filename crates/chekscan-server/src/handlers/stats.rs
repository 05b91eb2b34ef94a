//! Statistics handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use chekscan_core::{aggregate, StatisticsReport};

use crate::{AppError, AppState};

/// GET /api/statistics - Spending statistics over the current store
///
/// Recomputed in full on every request; nothing is cached.
pub async fn get_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatisticsReport>, AppError> {
    let receipts = state.store.list()?;
    Ok(Json(aggregate(&receipts)))
}
