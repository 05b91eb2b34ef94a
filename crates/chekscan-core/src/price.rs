//! Free-text price normalization
//!
//! OFD receipt pages render prices as locale-formatted text ("12 000,00 so'm",
//! "17,000"). This module reduces such strings to a plain numeric value.
//! Unparseable input yields 0.0 rather than an error; the `fallback` flag
//! records that a value was silently zeroed so tests can tell a lossy parse
//! from a genuine zero.

/// Result of parsing a price string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedPrice {
    pub value: f64,
    /// True when the input could not be parsed and the value was zeroed
    pub fallback: bool,
}

/// Parse a free-text price into a non-negative numeric value.
///
/// Keeps only digits, commas, and periods, then drops commas (treated as
/// thousands grouping, never as a decimal separator) before parsing as f64.
pub fn parse_price(text: &str) -> ParsedPrice {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let cleaned = cleaned.replace(',', "");

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => ParsedPrice {
            value,
            fallback: false,
        },
        _ => ParsedPrice {
            value: 0.0,
            fallback: true,
        },
    }
}

/// Convenience accessor for callers that only need the numeric value
pub fn price_value(text: &str) -> f64 {
    parse_price(text).value
}
