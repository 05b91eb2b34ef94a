//! Test utilities for chekscan-core
//!
//! In-process mock servers for integration tests: an Ollama stand-in for
//! the AI categorizer, and a static receipt-page server for the scanner.

use axum::{
    extract::Json,
    response::Html,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::sync::oneshot;

/// Mock Ollama server for testing and development
pub struct MockOllamaServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockOllamaServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/api/tags", get(handle_tags))
            .route("/api/generate", post(handle_generate));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockOllamaServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Ollama tags endpoint response (health check)
async fn handle_tags() -> Json<TagsResponse> {
    Json(TagsResponse {
        models: vec![ModelInfo {
            name: "llama3.2:latest".to_string(),
            modified_at: "2024-01-01T00:00:00Z".to_string(),
            size: 4_000_000_000,
        }],
    })
}

/// Ollama generate endpoint: answers the categorization prompt with a bare
/// label for a few known products, "other" otherwise, and free text for
/// anything that does not look like a categorization prompt.
async fn handle_generate(Json(request): Json<GenerateRequest>) -> Json<GenerateResponse> {
    let prompt = request.prompt.to_lowercase();

    let response = if prompt.contains("classify the product") {
        if prompt.contains("snickers") {
            "sweets"
        } else if prompt.contains("redbull") || prompt.contains("red bull") {
            "beverages"
        } else if prompt.contains("domestos") {
            "household"
        } else if prompt.contains("garbage-answer") {
            "I have no idea what that is"
        } else {
            "other"
        }
    } else {
        "unexpected prompt"
    };

    Json(GenerateResponse {
        model: request.model,
        response: response.to_string(),
        done: true,
    })
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[allow(dead_code)]
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    model: String,
    response: String,
    done: bool,
}

#[derive(Debug, Serialize)]
struct TagsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    name: String,
    modified_at: String,
    size: u64,
}

/// Mock receipt-page server: serves a fixed HTML document at `/check`
pub struct MockReceiptServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockReceiptServer {
    /// Start a server that responds to GET /check with the given HTML
    pub async fn start(html: &str) -> Self {
        let body = html.to_string();
        let app = Router::new().route(
            "/check",
            get(move || {
                let body = body.clone();
                async move { Html(body) }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// URL of the served receipt page
    pub fn check_url(&self) -> String {
        format!("http://{}/check", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockReceiptServer {
    fn drop(&mut self) {
        self.stop();
    }
}
