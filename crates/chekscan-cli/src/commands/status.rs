//! Status command implementation

use anyhow::Result;

use chekscan_core::ai::CategorizerBackend;
use chekscan_core::{AiClient, ReceiptStore};

pub async fn cmd_status(store: &ReceiptStore) -> Result<()> {
    println!("chekscan status");
    match store.path() {
        Some(path) => println!("  Store:    {} (file)", path.display()),
        None => println!("  Store:    in-memory"),
    }
    println!("  Receipts: {}", store.len());

    match AiClient::from_env() {
        Some(client) => {
            let healthy = client.health_check().await;
            println!(
                "  AI:       {} (model: {}) - {}",
                client.host(),
                client.model(),
                if healthy { "reachable" } else { "unreachable" }
            );
        }
        None => {
            println!("  AI:       not configured (set OLLAMA_HOST to enable)");
        }
    }

    Ok(())
}
