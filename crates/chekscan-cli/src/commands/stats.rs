//! Statistics command implementation

use anyhow::Result;

use chekscan_core::{aggregate, ReceiptStore};

pub fn cmd_stats(store: &ReceiptStore) -> Result<()> {
    let receipts = store.list()?;
    let report = aggregate(&receipts);

    if report.categories.is_empty() {
        println!("No spending recorded yet. Scan a receipt first.");
        return Ok(());
    }

    println!("Spending by category:");
    for bucket in &report.categories {
        println!(
            "  {:<12} {:>12.0}  ({} item(s))",
            bucket.category.as_str(),
            bucket.total_spend,
            bucket.item_count
        );
    }
    println!();
    println!(
        "Grand total: {:.0} across {} receipt(s)",
        report.grand_total, report.receipt_count
    );
    Ok(())
}
