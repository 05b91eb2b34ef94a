//! Ollama backend implementation
//!
//! HTTP client for the Ollama API. The categorization prompt is constrained
//! to the known category labels so the model's answer can be matched back to
//! a `Category` without free-text interpretation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Category;

use super::parsing::parse_category_answer;
use super::CategorizerBackend;

/// Per-request timeout for Ollama calls
const OLLAMA_TIMEOUT: Duration = Duration::from_secs(30);

/// Ollama backend for item categorization
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
}

impl Clone for OllamaBackend {
    fn clone(&self) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
        }
    }
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: model.to_string(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("OLLAMA_HOST").ok()?;
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string());
        Some(Self::new(&host, &model))
    }

    fn build_prompt(name: &str) -> String {
        let labels = Category::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "You are labeling grocery receipt items. Classify the product into \
             exactly one category from this list: {}. Respond with only the \
             category label, nothing else.\n\nProduct: \"{}\"",
            labels, name
        )
    }
}

/// Request to Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl CategorizerBackend for OllamaBackend {
    async fn categorize(&self, name: &str) -> Result<Category> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: Self::build_prompt(name),
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(OLLAMA_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let ollama_response: OllamaResponse = response.json().await?;
        debug!(item = %name, "Ollama category response: {}", ollama_response.response);

        parse_category_answer(&ollama_response.response).ok_or_else(|| {
            let raw = ollama_response.response;
            let truncated = if raw.len() > 200 {
                format!("{}...", &raw[..200])
            } else {
                raw
            };
            Error::InvalidData(format!("Unrecognized category from AI: {}", truncated))
        })
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(OLLAMA_TIMEOUT)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockOllamaServer;

    #[tokio::test]
    async fn test_categorize_against_mock_server() {
        let server = MockOllamaServer::start().await;
        let backend = OllamaBackend::new(&server.url(), "llama3.2");

        assert!(backend.health_check().await);

        let category = backend.categorize("Snickers bar").await.unwrap();
        assert_eq!(category, Category::Sweets);
    }

    #[tokio::test]
    async fn test_unrecognized_answer_is_an_error() {
        let server = MockOllamaServer::start().await;
        let backend = OllamaBackend::new(&server.url(), "llama3.2");

        let result = backend.categorize("garbage-answer").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_health_check_unreachable_host() {
        let backend = OllamaBackend::new("http://127.0.0.1:1", "llama3.2");
        assert!(!backend.health_check().await);
    }

    #[test]
    fn test_prompt_lists_all_labels() {
        let prompt = OllamaBackend::build_prompt("Cola 1.5L");
        for category in Category::ALL {
            assert!(prompt.contains(category.as_str()));
        }
        assert!(prompt.contains("Cola 1.5L"));
    }
}
