//! Receipt scanning: fetch a check-viewer page and extract a receipt
//!
//! The fetch is a single attempt with a bounded timeout; any transport
//! failure or non-success status aborts the whole extraction. Parsing never
//! fails on its own (see `extract`), so a scan error always means the page
//! could not be fetched.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::ai::ItemCategorizer;
use crate::error::{Error, Result};
use crate::extract::ReceiptExtractor;
use crate::models::DraftReceipt;

/// Timeout for fetching a receipt page
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches check-viewer pages and turns them into draft receipts
pub struct ReceiptScanner {
    http_client: Client,
    extractor: ReceiptExtractor,
    categorizer: ItemCategorizer,
}

impl Default for ReceiptScanner {
    fn default() -> Self {
        Self::new(ItemCategorizer::new())
    }
}

impl ReceiptScanner {
    pub fn new(categorizer: ItemCategorizer) -> Self {
        Self {
            http_client: Client::new(),
            extractor: ReceiptExtractor::new(),
            categorizer,
        }
    }

    /// Build a scanner with the AI fallback taken from the environment
    pub fn from_env() -> Self {
        Self::new(ItemCategorizer::from_env())
    }

    /// The configured categorizer (for logging/diagnostics)
    pub fn categorizer(&self) -> &ItemCategorizer {
        &self.categorizer
    }

    /// Fetch the page at `url` and extract a draft receipt from it.
    ///
    /// A fetch failure (connection error, timeout, non-2xx status) aborts
    /// the extraction entirely; no partial data is returned.
    pub async fn scan(&self, url: &str) -> Result<DraftReceipt> {
        let html = self.fetch(url).await?;
        debug!(url = %url, bytes = html.len(), "Fetched receipt page");

        let mut draft = self.extractor.parse(&html, url);
        self.categorizer.refine_items(&mut draft.items).await;

        info!(
            url = %url,
            merchant = %draft.merchant_name,
            items = draft.items.len(),
            "Extracted receipt"
        );
        Ok(draft)
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .http_client
            .get(url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{} returned {}", url, status)));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::test_utils::MockReceiptServer;

    const RECEIPT_HTML: &str = r#"
        <html><body>
          <h3 style="font-weight: bold;">ShopCo</h3>
          <table>
            <tr><td><b>12345</b></td></tr>
            <tr><td><i>21.05.2024 14:30</i></td></tr>
            <tr class="products-row">
              <td>Bread Loaf</td>
              <td align="center">1</td>
              <td class="price-sum">5000</td>
            </tr>
            <tr><td>Jami to`lov:</td><td>5000</td></tr>
          </table>
        </body></html>
    "#;

    #[tokio::test]
    async fn test_scan_extracts_receipt_from_live_page() {
        let server = MockReceiptServer::start(RECEIPT_HTML).await;
        let scanner = ReceiptScanner::default();

        let draft = scanner.scan(&server.check_url()).await.unwrap();

        assert_eq!(draft.merchant_name, "ShopCo");
        assert_eq!(draft.receipt_number, "12345");
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].category, Category::Bread);
        assert_eq!(draft.total_text, "5000");
    }

    #[tokio::test]
    async fn test_scan_unreachable_url_aborts() {
        let scanner = ReceiptScanner::default();
        let result = scanner.scan("http://127.0.0.1:1/check").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_scan_non_success_status_aborts() {
        let server = MockReceiptServer::start(RECEIPT_HTML).await;
        let url = format!("{}/missing", server.check_url());

        let scanner = ReceiptScanner::default();
        let result = scanner.scan(&url).await;

        match result {
            Err(Error::Fetch(msg)) => assert!(msg.contains("404")),
            other => panic!("expected fetch error, got {:?}", other.map(|d| d.merchant_name)),
        }
    }
}
