//! Built-in index page
//!
//! A single embedded HTML page that renders the receipt list and spending
//! statistics from the JSON API. Deployments that want a real frontend
//! serve one with `--static-dir` instead.

use axum::response::Html;

/// GET / - Built-in receipts page
pub async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
