//! Item categorization pipeline
//!
//! Keyword classification first; an optional AI backend is consulted only
//! for names the keyword rules left in the fallback bucket. AI results are
//! cached per lower-cased product name so repeated lookups for the same
//! name within a session are free.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::classify::{classify, Classification};
use crate::error::{Error, Result};
use crate::models::{Category, LineItem};

use super::{AiClient, CategorizerBackend};

/// Categorizer combining the keyword classifier with an optional AI fallback
#[derive(Default)]
pub struct ItemCategorizer {
    client: Option<AiClient>,
    cache: Mutex<HashMap<String, Category>>,
}

impl ItemCategorizer {
    /// Keyword-only categorizer (fully deterministic)
    pub fn new() -> Self {
        Self {
            client: None,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Categorizer with an AI fallback for unmatched names
    pub fn with_client(client: AiClient) -> Self {
        Self {
            client: Some(client),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Create from environment variables (AI fallback only when configured)
    pub fn from_env() -> Self {
        match AiClient::from_env() {
            Some(client) => Self::with_client(client),
            None => Self::new(),
        }
    }

    /// The configured AI client, if any
    pub fn client(&self) -> Option<&AiClient> {
        self.client.as_ref()
    }

    /// Categorize a single product name.
    ///
    /// The AI backend is consulted only when the keyword classifier fell
    /// back to `Other`; any backend failure keeps the keyword result.
    pub async fn categorize(&self, name: &str) -> Classification {
        let keyword = classify(name);
        if !keyword.fallback {
            return keyword;
        }

        match self.remote_category(name).await {
            Some(category) => Classification {
                category,
                // Still a fallback path: the keyword rules had no answer
                fallback: true,
            },
            None => keyword,
        }
    }

    /// Re-run fallback items through the AI backend, in place.
    ///
    /// Items already placed by the keyword rules are left untouched.
    pub async fn refine_items(&self, items: &mut [LineItem]) {
        if self.client.is_none() {
            return;
        }
        for item in items.iter_mut() {
            if item.category != Category::Other {
                continue;
            }
            if let Some(category) = self.remote_category(&item.name).await {
                item.category = category;
            }
        }
    }

    /// Look up a name with the AI backend, consulting the cache first.
    /// Returns None when no backend is configured or the lookup failed.
    async fn remote_category(&self, name: &str) -> Option<Category> {
        let client = self.client.as_ref()?;
        let key = name.to_lowercase();

        match self.cached(&key) {
            Ok(Some(category)) => {
                debug!(item = %name, category = %category, "AI category cache hit");
                return Some(category);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "AI category cache unavailable");
                return None;
            }
        }

        match client.categorize(name).await {
            Ok(category) => {
                if category != Category::Other {
                    if let Ok(mut cache) = self.cache.lock() {
                        cache.insert(key, category);
                    }
                    debug!(item = %name, category = %category, "AI categorized item");
                    return Some(category);
                }
                None
            }
            Err(e) => {
                warn!(item = %name, error = %e, "AI categorization failed, keeping keyword result");
                None
            }
        }
    }

    fn cached(&self, key: &str) -> Result<Option<Category>> {
        let cache = self
            .cache
            .lock()
            .map_err(|_| Error::Store("Failed to acquire AI cache lock".into()))?;
        Ok(cache.get(key).copied())
    }
}
