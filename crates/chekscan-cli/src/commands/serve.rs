//! Server command implementation

use std::path::PathBuf;

use anyhow::Result;

use chekscan_core::ReceiptStore;
use chekscan_server::ServerConfig;

pub async fn cmd_serve(
    store: ReceiptStore,
    host: &str,
    port: u16,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    println!("🚀 Starting chekscan web server...");
    match store.path() {
        Some(path) => println!("   Store: {}", path.display()),
        None => println!("   Store: in-memory (lost on exit)"),
    }
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = &static_dir {
        println!("   Static files: {}", dir.display());
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let config = ServerConfig { static_dir };

    chekscan_server::serve(store, host, port, config).await?;

    Ok(())
}
