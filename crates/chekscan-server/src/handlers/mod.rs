//! HTTP request handlers organized by domain

pub mod health;
pub mod pages;
pub mod receipts;
pub mod stats;

// Re-export all handlers for use in router
pub use health::*;
pub use pages::*;
pub use receipts::*;
pub use stats::*;
