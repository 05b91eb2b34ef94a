//! Receipt field extraction from OFD check-viewer HTML
//!
//! The check-viewer markup is an unversioned external protocol: it may
//! change without notice, so every field rule is independently best-effort.
//! Missing structure yields the documented default for that field; only the
//! caller's fetch layer can fail the extraction as a whole.
//!
//! Field rules (defaults in parentheses):
//! - merchant: first heading whose inline style declares bold ("unknown")
//! - receipt number: bolded text inside the first table cell ("N/A")
//! - date/time: first italic fragment with a period and a digit ("N/A")
//! - items: `tr.products-row` rows with name/quantity/price cells
//! - total: cell following the localized "total payment" label ("0")

use scraper::{ElementRef, Html, Selector};

use crate::classify::classify;
use crate::models::{DraftReceipt, LineItem};
use crate::price::parse_price;

/// Default merchant name when no bold heading is present
pub const UNKNOWN_MERCHANT: &str = "unknown";

/// Default for missing receipt number / date
pub const NOT_AVAILABLE: &str = "N/A";

/// Default total when the label cell is never found
pub const DEFAULT_TOTAL: &str = "0";

// The total-payment label as rendered by the viewer. The backtick spelling
// is what the page actually serves; the apostrophe variants cover copies of
// the markup that normalize it.
const TOTAL_LABELS: &[&str] = &["Jami to`lov", "Jami to'lov", "Jami to\u{2018}lov"];

/// HTML extraction strategy with one named rule per receipt field
pub struct ReceiptExtractor {
    headings: Selector,
    table_cells: Selector,
    bold: Selector,
    italics: Selector,
    product_rows: Selector,
    center_cells: Selector,
    price_cells: Selector,
}

impl Default for ReceiptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptExtractor {
    pub fn new() -> Self {
        // Static selectors, known valid
        Self {
            headings: Selector::parse("h1, h2, h3, h4, h5, h6").unwrap(),
            table_cells: Selector::parse("td").unwrap(),
            bold: Selector::parse("b").unwrap(),
            italics: Selector::parse("i").unwrap(),
            product_rows: Selector::parse("tr.products-row").unwrap(),
            center_cells: Selector::parse("td[align=\"center\"]").unwrap(),
            price_cells: Selector::parse("td.price-sum").unwrap(),
        }
    }

    /// Parse raw check-viewer HTML into a draft receipt.
    ///
    /// Never fails: each field degrades to its default when the expected
    /// structure is absent. Item categories and numeric prices are assigned
    /// here, at extraction time.
    pub fn parse(&self, html: &str, source_url: &str) -> DraftReceipt {
        let document = Html::parse_document(html);

        DraftReceipt {
            source_url: source_url.to_string(),
            merchant_name: self.merchant_name(&document),
            receipt_number: self.receipt_number(&document),
            date_time: self.date_time(&document),
            items: self.line_items(&document),
            total_text: self.total_text(&document),
        }
    }

    /// First heading element whose inline style declares bold weight
    fn merchant_name(&self, document: &Html) -> String {
        document
            .select(&self.headings)
            .find(|el| {
                el.value()
                    .attr("style")
                    .map(|style| {
                        let style = style.to_lowercase();
                        style.contains("font-weight") && style.contains("bold")
                    })
                    .unwrap_or(false)
            })
            .map(element_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNKNOWN_MERCHANT.to_string())
    }

    /// Bolded text inside the first table cell in document order
    fn receipt_number(&self, document: &Html) -> String {
        document
            .select(&self.table_cells)
            .next()
            .and_then(|td| td.select(&self.bold).next())
            .map(element_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// First italic fragment that looks date-like (a period plus a digit)
    fn date_time(&self, document: &Html) -> String {
        document
            .select(&self.italics)
            .map(element_text)
            .find(|text| text.contains('.') && text.chars().any(|c| c.is_ascii_digit()))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// All product rows that carry the full name/quantity/price cell set.
    /// Rows missing any of the three cells are skipped silently.
    fn line_items(&self, document: &Html) -> Vec<LineItem> {
        document
            .select(&self.product_rows)
            .filter_map(|row| self.line_item(row))
            .collect()
    }

    fn line_item(&self, row: ElementRef) -> Option<LineItem> {
        // The name lives in the row's own first cell; nested tables inside
        // the row must not shadow it, hence direct children only.
        let name_td = row
            .children()
            .filter_map(ElementRef::wrap)
            .find(|child| child.value().name() == "td")?;
        let qty_td = row.select(&self.center_cells).next()?;
        let price_td = row.select(&self.price_cells).next()?;

        let name = element_text(name_td);
        let price_text = element_text(price_td);
        let price = parse_price(&price_text);

        Some(LineItem {
            category: classify(&name).category,
            name,
            quantity: element_text(qty_td),
            price_value: price.value,
            price_text,
        })
    }

    /// Text of the cell immediately following the total-payment label cell
    fn total_text(&self, document: &Html) -> String {
        document
            .select(&self.table_cells)
            .find(|td| {
                let text = element_text(*td);
                TOTAL_LABELS.iter().any(|label| text.contains(label))
            })
            .and_then(next_sibling_cell)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| DEFAULT_TOTAL.to_string())
    }
}

/// Element text with collapsed whitespace
fn element_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Next sibling element that is a table cell
fn next_sibling_cell(el: ElementRef) -> Option<ElementRef> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "td")
}
