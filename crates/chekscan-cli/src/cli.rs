//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// chekscan - Scan fiscal receipts and track spending by category
#[derive(Parser)]
#[command(name = "chekscan")]
#[command(about = "OFD receipt scanner with spending statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Receipt store file (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Keep receipts in memory only (lost on exit)
    #[arg(long, global = true)]
    pub memory: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve instead of the
        /// built-in page
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Scan a check-viewer URL and store the receipt
    Scan {
        /// Receipt page URL
        url: String,
    },

    /// Manage stored receipts
    Receipts {
        #[command(subcommand)]
        action: Option<ReceiptsAction>,
    },

    /// Show spending statistics by category
    Stats,

    /// Show store and AI backend status
    Status,
}

#[derive(Subcommand)]
pub enum ReceiptsAction {
    /// List stored receipts
    List,

    /// Delete a receipt by id
    Delete {
        /// Receipt id
        id: i64,
    },
}
