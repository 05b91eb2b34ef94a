//! Command implementations

mod receipts;
mod scan;
mod serve;
mod stats;
mod status;

pub use receipts::{cmd_receipts_delete, cmd_receipts_list};
pub use scan::cmd_scan;
pub use serve::cmd_serve;
pub use stats::cmd_stats;
pub use status::cmd_status;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use chekscan_core::ReceiptStore;

/// Default receipt store location
/// (~/.local/share/chekscan/receipts.json on Linux)
pub fn default_data_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("chekscan").join("receipts.json"))
        .unwrap_or_else(|| PathBuf::from("receipts.json"))
}

/// Open the receipt store for the given flags
pub fn open_store(data: Option<&Path>, memory: bool) -> Result<ReceiptStore> {
    if memory {
        return Ok(ReceiptStore::in_memory());
    }
    let path = data.map(Path::to_path_buf).unwrap_or_else(default_data_path);
    ReceiptStore::open(&path)
        .with_context(|| format!("Failed to open receipt store at {}", path.display()))
}
