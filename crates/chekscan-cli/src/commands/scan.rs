//! Scan command implementation

use anyhow::{Context, Result};

use chekscan_core::ai::CategorizerBackend;
use chekscan_core::{ReceiptScanner, ReceiptStore};

pub async fn cmd_scan(store: &ReceiptStore, url: &str) -> Result<()> {
    let scanner = ReceiptScanner::from_env();
    if let Some(client) = scanner.categorizer().client() {
        println!(
            "Using AI categorizer: {} (model: {})",
            client.host(),
            client.model()
        );
    }

    let draft = scanner
        .scan(url)
        .await
        .with_context(|| format!("Failed to scan {}", url))?;
    let receipt = store.add(draft).context("Failed to store receipt")?;

    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}
