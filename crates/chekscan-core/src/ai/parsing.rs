//! Answer parsing for AI categorizer responses
//!
//! Models rarely answer with the bare label even when asked to: they quote
//! it, add punctuation, or wrap it in a sentence. These helpers recover a
//! `Category` from such responses, returning None for anything that cannot
//! be matched to a known label.

use crate::models::Category;

/// Parse a category label from an AI response.
///
/// Tries an exact label match on the cleaned answer first, then falls back
/// to the first known label contained anywhere in it.
pub fn parse_category_answer(response: &str) -> Option<Category> {
    let cleaned = response
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '.' | '!' | ':' | '*'))
        .to_lowercase();

    if let Ok(category) = cleaned.parse::<Category>() {
        return Some(category);
    }

    Category::ALL
        .iter()
        .copied()
        .find(|c| cleaned.contains(c.as_str()))
}
