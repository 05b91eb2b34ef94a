//! chekscan Web Server
//!
//! Axum-based REST API for the chekscan receipt scanner. Serves the receipt
//! collection, the fetch-and-extract endpoint, spending statistics, and a
//! built-in index page (replaceable with a static directory).

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

use chekscan_core::ai::CategorizerBackend;
use chekscan_core::{ReceiptScanner, ReceiptStore};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Directory of static files to serve instead of the built-in page
    pub static_dir: Option<PathBuf>,
}

/// Shared application state
pub struct AppState {
    pub store: ReceiptStore,
    pub scanner: ReceiptScanner,
    pub config: ServerConfig,
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
///
/// The AI categorizer is configured from the environment (OLLAMA_HOST etc.);
/// use [`create_router_with_scanner`] to inject one directly.
pub fn create_router(store: ReceiptStore, config: ServerConfig) -> Router {
    let scanner = ReceiptScanner::from_env();
    match scanner.categorizer().client() {
        Some(client) => {
            info!(
                "AI categorizer configured: {} (model: {})",
                client.host(),
                client.model()
            );
        }
        None => {
            info!("AI categorizer not configured (set OLLAMA_HOST to enable the AI fallback)");
        }
    }
    create_router_with_scanner(store, scanner, config)
}

/// Create the application router with an explicit scanner (for testing)
pub fn create_router_with_scanner(
    store: ReceiptStore,
    scanner: ReceiptScanner,
    config: ServerConfig,
) -> Router {
    let state = Arc::new(AppState {
        store,
        scanner,
        config: config.clone(),
    });

    let api_routes = Router::new()
        .route("/receipts", get(handlers::list_receipts))
        .route("/receipts/:id", delete(handlers::delete_receipt))
        .route("/fetch-receipt", get(handlers::fetch_receipt))
        .route("/statistics", get(handlers::get_statistics))
        .route("/health", get(handlers::health));

    let app = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health));

    // The built-in page lists receipts and statistics from the JSON API;
    // a static directory takes over the whole non-API surface when set.
    let app = match config.static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app.route("/", get(handlers::index_page)),
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until shutdown
pub async fn serve(
    store: ReceiptStore,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(store, config);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
