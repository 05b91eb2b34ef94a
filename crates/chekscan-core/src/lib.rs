//! chekscan Core Library
//!
//! Shared functionality for the chekscan receipt scanner:
//! - HTML extraction of receipts from OFD check-viewer pages
//! - Keyword classification of line items into spending categories
//! - Optional local-AI categorizer fallback (Ollama) with response caching
//! - Price text normalization
//! - Receipt storage (in-memory or flat JSON file)
//! - Spending statistics aggregation

pub mod ai;
pub mod classify;
pub mod error;
pub mod extract;
pub mod models;
pub mod price;
pub mod scan;
pub mod stats;
pub mod store;

/// Test utilities including mock Ollama and receipt-page servers
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AiClient, CategorizerBackend, ItemCategorizer, MockBackend, OllamaBackend};
pub use classify::{classify, Classification};
pub use error::{Error, Result};
pub use extract::ReceiptExtractor;
pub use models::{
    Category, CategoryBucket, DraftReceipt, LineItem, Receipt, StatItem, StatisticsReport,
};
pub use price::{parse_price, price_value, ParsedPrice};
pub use scan::ReceiptScanner;
pub use stats::aggregate;
pub use store::ReceiptStore;
