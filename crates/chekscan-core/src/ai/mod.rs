//! Pluggable AI categorizer backends
//!
//! This module provides a backend-agnostic interface for the optional
//! AI-based item categorizer. The deterministic keyword classifier never
//! depends on it; a backend is only consulted for names the keyword rules
//! could not place (see [`ItemCategorizer`]).
//!
//! # Architecture
//!
//! - `CategorizerBackend` trait: defines the interface
//! - `AiClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OllamaBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (ollama, mock). Default: ollama
//! - `OLLAMA_HOST`: Ollama server URL (required for ollama backend)
//! - `OLLAMA_MODEL`: Model name (default: llama3.2)

mod categorizer;
mod mock;
mod ollama;
pub mod parsing;

pub use categorizer::ItemCategorizer;
pub use mock::MockBackend;
pub use ollama::OllamaBackend;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Category;

/// Trait defining the interface for AI categorizer backends
///
/// Backends must be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait CategorizerBackend: Send + Sync {
    /// Categorize a product name into one of the known category labels
    async fn categorize(&self, name: &str) -> Result<Category>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client wrapper
///
/// Provides Clone and compile-time dispatch over the available backends.
#[derive(Clone)]
pub enum AiClient {
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AiClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `ollama` (default): Uses OLLAMA_HOST and OLLAMA_MODEL
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "ollama".to_string());

        match backend.to_lowercase().as_str() {
            "ollama" => OllamaBackend::from_env().map(AiClient::Ollama),
            "mock" => Some(AiClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to ollama");
                OllamaBackend::from_env().map(AiClient::Ollama)
            }
        }
    }

    /// Create an Ollama backend directly
    pub fn ollama(host: &str, model: &str) -> Self {
        AiClient::Ollama(OllamaBackend::new(host, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AiClient::Mock(MockBackend::new())
    }
}

// Implement CategorizerBackend for AiClient by delegating to the inner backend
#[async_trait]
impl CategorizerBackend for AiClient {
    async fn categorize(&self, name: &str) -> Result<Category> {
        match self {
            AiClient::Ollama(b) => b.categorize(name).await,
            AiClient::Mock(b) => b.categorize(name).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AiClient::Ollama(b) => b.health_check().await,
            AiClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AiClient::Ollama(b) => b.model(),
            AiClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AiClient::Ollama(b) => b.host(),
            AiClient::Mock(b) => b.host(),
        }
    }
}
