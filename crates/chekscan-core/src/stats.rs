//! Spending statistics aggregation
//!
//! A pure fold over the stored receipts: no incremental state, recomputed
//! in full on every request. Categories and numeric prices were fixed at
//! extraction time, so aggregation never re-parses or re-classifies.

use std::cmp::Ordering;

use crate::models::{Category, CategoryBucket, Receipt, StatItem, StatisticsReport};

/// Aggregate all line items of all receipts into a statistics report.
///
/// Empty category buckets are dropped; the rest are sorted by descending
/// total spend. The sort is stable and buckets start in `Category`
/// declaration order, so ties keep that order (and `other` sorts last
/// among zero-spend survivors).
pub fn aggregate(receipts: &[Receipt]) -> StatisticsReport {
    let mut buckets: Vec<CategoryBucket> = Category::ALL
        .iter()
        .map(|&category| CategoryBucket {
            category,
            total_spend: 0.0,
            item_count: 0,
            items: Vec::new(),
        })
        .collect();
    let mut grand_total = 0.0;

    for receipt in receipts {
        for item in &receipt.items {
            let bucket = &mut buckets[item.category.index()];
            bucket.total_spend += item.price_value;
            bucket.item_count += 1;
            bucket.items.push(StatItem {
                name: item.name.clone(),
                price: item.price_value,
                receipt_number: receipt.receipt_number.clone(),
            });
            grand_total += item.price_value;
        }
    }

    buckets.retain(|b| b.item_count > 0);
    buckets.sort_by(|a, b| {
        b.total_spend
            .partial_cmp(&a.total_spend)
            .unwrap_or(Ordering::Equal)
    });

    StatisticsReport {
        categories: buckets,
        grand_total,
        receipt_count: receipts.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineItem;

    fn item(name: &str, price: f64, category: Category) -> LineItem {
        LineItem {
            name: name.into(),
            quantity: "1".into(),
            price_text: format!("{}", price),
            price_value: price,
            category,
        }
    }

    fn receipt(id: i64, number: &str, items: Vec<LineItem>) -> Receipt {
        Receipt {
            id,
            source_url: "http://ofd.example/check".into(),
            merchant_name: "ShopCo".into(),
            receipt_number: number.into(),
            date_time: "21.05.2024 14:30".into(),
            items,
            total_text: "0".into(),
            scanned_at: "2024-05-21T14:30:00Z".into(),
        }
    }

    #[test]
    fn test_empty_input() {
        let report = aggregate(&[]);
        assert!(report.categories.is_empty());
        assert_eq!(report.grand_total, 0.0);
        assert_eq!(report.receipt_count, 0);
    }

    #[test]
    fn test_two_receipts_mixed_categories() {
        let receipts = vec![
            receipt(1, "100", vec![item("Zajigalka", 500.0, Category::Other)]),
            receipt(
                2,
                "101",
                vec![
                    item("Cola", 1000.0, Category::Beverages),
                    item("Fanta", 2000.0, Category::Beverages),
                ],
            ),
        ];

        let report = aggregate(&receipts);

        assert_eq!(report.receipt_count, 2);
        assert_eq!(report.grand_total, 3500.0);
        assert_eq!(report.categories.len(), 2);

        // Beverages (3000) sorts above other (500)
        assert_eq!(report.categories[0].category, Category::Beverages);
        assert_eq!(report.categories[0].total_spend, 3000.0);
        assert_eq!(report.categories[0].item_count, 2);
        assert_eq!(report.categories[1].category, Category::Other);

        // Items carry their source receipt number
        assert_eq!(report.categories[0].items[0].receipt_number, "101");
    }

    #[test]
    fn test_bucket_totals_sum_to_grand_total() {
        let receipts = vec![
            receipt(
                1,
                "1",
                vec![
                    item("Non", 3000.0, Category::Bread),
                    item("Sut", 8000.0, Category::Dairy),
                    item("Cola", 12000.0, Category::Beverages),
                ],
            ),
            receipt(2, "2", vec![item("Shokolad", 15000.0, Category::Sweets)]),
        ];

        let report = aggregate(&receipts);
        let bucket_sum: f64 = report.categories.iter().map(|b| b.total_spend).sum();
        assert_eq!(bucket_sum, report.grand_total);
        assert_eq!(report.grand_total, 38000.0);
    }

    #[test]
    fn test_empty_buckets_never_appear() {
        let receipts = vec![receipt(1, "1", vec![item("Non", 3000.0, Category::Bread)])];
        let report = aggregate(&receipts);

        assert_eq!(report.categories.len(), 1);
        assert!(report
            .categories
            .iter()
            .all(|b| b.item_count > 0 && !b.items.is_empty()));
    }

    #[test]
    fn test_descending_order_with_stable_ties() {
        let receipts = vec![receipt(
            1,
            "1",
            vec![
                // Dairy and bread tie at 5000; dairy declares after bread,
                // so bread keeps the earlier position.
                item("Non", 5000.0, Category::Bread),
                item("Sut", 5000.0, Category::Dairy),
                item("Gosht", 9000.0, Category::MeatFish),
            ],
        )];

        let report = aggregate(&receipts);
        let order: Vec<Category> = report.categories.iter().map(|b| b.category).collect();
        assert_eq!(
            order,
            vec![Category::MeatFish, Category::Bread, Category::Dairy]
        );
    }

    #[test]
    fn test_items_within_bucket_keep_receipt_order() {
        let receipts = vec![
            receipt(1, "1", vec![item("Cola", 1000.0, Category::Beverages)]),
            receipt(2, "2", vec![item("Fanta", 2000.0, Category::Beverages)]),
        ];

        let report = aggregate(&receipts);
        let names: Vec<&str> = report.categories[0]
            .items
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Cola", "Fanta"]);
    }
}
