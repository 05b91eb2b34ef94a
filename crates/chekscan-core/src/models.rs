//! Domain models for chekscan

use serde::{Deserialize, Serialize};

/// Spending category assigned to a receipt line item.
///
/// Declaration order is significant: the keyword classifier tests categories
/// in this order (earlier categories win on overlapping keywords), and the
/// statistics report breaks spend ties by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sweets,
    Beverages,
    Bread,
    Dairy,
    #[serde(rename = "meat/fish")]
    MeatFish,
    Produce,
    Grains,
    Health,
    Hygiene,
    Household,
    Other,
}

impl Category {
    /// All categories in declaration (classifier test) order
    pub const ALL: [Category; 11] = [
        Self::Sweets,
        Self::Beverages,
        Self::Bread,
        Self::Dairy,
        Self::MeatFish,
        Self::Produce,
        Self::Grains,
        Self::Health,
        Self::Hygiene,
        Self::Household,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sweets => "sweets",
            Self::Beverages => "beverages",
            Self::Bread => "bread",
            Self::Dairy => "dairy",
            Self::MeatFish => "meat/fish",
            Self::Produce => "produce",
            Self::Grains => "grains",
            Self::Health => "health",
            Self::Hygiene => "hygiene",
            Self::Household => "household",
            Self::Other => "other",
        }
    }

    /// Position in the fixed declaration order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sweets" => Ok(Self::Sweets),
            "beverages" => Ok(Self::Beverages),
            "bread" => Ok(Self::Bread),
            "dairy" => Ok(Self::Dairy),
            "meat/fish" | "meat" | "fish" | "meat-fish" => Ok(Self::MeatFish),
            "produce" => Ok(Self::Produce),
            "grains" => Ok(Self::Grains),
            "health" => Ok(Self::Health),
            "hygiene" => Ok(Self::Hygiene),
            "household" => Ok(Self::Household),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One purchased product entry within a receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: String,
    /// Raw price text as shown on the receipt page
    pub price_text: String,
    /// Numeric value derived from `price_text` (0.0 on unparseable text)
    pub price_value: f64,
    /// Category assigned at extraction time, not recomputed at read time
    pub category: Category,
}

/// Extraction output: a receipt before the store assigns id/scanned_at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftReceipt {
    pub source_url: String,
    pub merchant_name: String,
    pub receipt_number: String,
    pub date_time: String,
    pub items: Vec<LineItem>,
    pub total_text: String,
}

/// A stored receipt. Immutable once persisted, except for deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: i64,
    pub source_url: String,
    pub merchant_name: String,
    pub receipt_number: String,
    pub date_time: String,
    pub items: Vec<LineItem>,
    pub total_text: String,
    /// RFC 3339 timestamp of when the page was scanned
    pub scanned_at: String,
}

impl Receipt {
    /// Attach the store-assigned id and scan timestamp to a draft
    pub fn from_draft(draft: DraftReceipt, id: i64, scanned_at: String) -> Self {
        Self {
            id,
            source_url: draft.source_url,
            merchant_name: draft.merchant_name,
            receipt_number: draft.receipt_number,
            date_time: draft.date_time,
            items: draft.items,
            total_text: draft.total_text,
            scanned_at,
        }
    }
}

/// One item entry inside a statistics bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatItem {
    pub name: String,
    pub price: f64,
    pub receipt_number: String,
}

/// Per-category accumulation in a statistics report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub category: Category,
    pub total_spend: f64,
    pub item_count: usize,
    pub items: Vec<StatItem>,
}

/// Aggregated spending statistics over the current store contents.
///
/// Derived on every request; never persisted. Categories with zero items are
/// dropped and the rest are ordered by descending `total_spend` (ties keep
/// `Category` declaration order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub categories: Vec<CategoryBucket>,
    pub grand_total: f64,
    pub receipt_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for cat in Category::ALL {
            let parsed: Category = cat.as_str().parse().unwrap();
            assert_eq!(parsed, cat);
        }
    }

    #[test]
    fn test_category_serde_labels() {
        let json = serde_json::to_string(&Category::MeatFish).unwrap();
        assert_eq!(json, "\"meat/fish\"");
        let json = serde_json::to_string(&Category::Household).unwrap();
        assert_eq!(json, "\"household\"");

        let cat: Category = serde_json::from_str("\"meat/fish\"").unwrap();
        assert_eq!(cat, Category::MeatFish);
    }

    #[test]
    fn test_category_index_matches_declaration_order() {
        for (i, cat) in Category::ALL.iter().enumerate() {
            assert_eq!(cat.index(), i);
        }
        assert_eq!(Category::Other.index(), Category::ALL.len() - 1);
    }

    #[test]
    fn test_category_aliases() {
        assert_eq!("meat".parse::<Category>().unwrap(), Category::MeatFish);
        assert_eq!("fish".parse::<Category>().unwrap(), Category::MeatFish);
        assert!("snacks".parse::<Category>().is_err());
    }
}
