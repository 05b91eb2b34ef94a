//! Mock backend for testing
//!
//! Returns predictable categories for a handful of well-known products.
//! Useful for unit tests and development without a running LLM server.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Category;

use super::CategorizerBackend;

/// Mock AI backend for testing
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self { healthy: true }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl CategorizerBackend for MockBackend {
    async fn categorize(&self, name: &str) -> Result<Category> {
        // Simple mock: recognize a few brand names the keyword tables miss
        let category = match name.to_uppercase().as_str() {
            n if n.contains("SNICKERS") || n.contains("TWIX") => Category::Sweets,
            n if n.contains("REDBULL") || n.contains("RED BULL") => Category::Beverages,
            n if n.contains("DOMESTOS") => Category::Household,
            n if n.contains("COLGATE") => Category::Hygiene,
            _ => Category::Other,
        };
        Ok(category)
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://local"
    }
}
