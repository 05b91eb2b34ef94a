//! chekscan CLI - OFD receipt scanner
//!
//! Usage:
//!   chekscan scan URL          Scan a check-viewer page and store the receipt
//!   chekscan receipts list     List stored receipts
//!   chekscan stats             Spending statistics by category
//!   chekscan serve --port 3000 Start the web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let store = commands::open_store(cli.data.as_deref(), cli.memory)?;

    match cli.command {
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(store, &host, port, static_dir).await,
        Commands::Scan { url } => commands::cmd_scan(&store, &url).await,
        Commands::Receipts { action } => match action {
            None | Some(ReceiptsAction::List) => commands::cmd_receipts_list(&store),
            Some(ReceiptsAction::Delete { id }) => commands::cmd_receipts_delete(&store, id),
        },
        Commands::Stats => commands::cmd_stats(&store),
        Commands::Status => commands::cmd_status(&store).await,
    }
}
