//! Receipt management commands

use anyhow::Result;

use chekscan_core::ReceiptStore;

pub fn cmd_receipts_list(store: &ReceiptStore) -> Result<()> {
    let receipts = store.list()?;
    if receipts.is_empty() {
        println!("No receipts stored.");
        return Ok(());
    }

    for receipt in &receipts {
        println!(
            "#{:<4} {:<30} {:<18} {:>3} item(s)  total {}",
            receipt.id,
            receipt.merchant_name,
            receipt.date_time,
            receipt.items.len(),
            receipt.total_text
        );
    }
    println!();
    println!("{} receipt(s)", receipts.len());
    Ok(())
}

pub fn cmd_receipts_delete(store: &ReceiptStore, id: i64) -> Result<()> {
    if store.delete(id)? {
        println!("Deleted receipt #{}", id);
    } else {
        println!("No receipt with id {} (nothing to delete)", id);
    }
    Ok(())
}
