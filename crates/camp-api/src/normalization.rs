//! Identity number normalization.
//!
//! Household heads type identity numbers on phones with Arabic keyboards, so
//! the same number can arrive as `٠١٢٣`, `۰۱۲۳`, `０１２３` or `0123`. Every
//! identity number is normalized before it is stored or compared.

use unicode_normalization::UnicodeNormalization;

/// Normalize an identity number for storage and comparison.
///
/// 1. NFKC folds compatibility forms (full-width digits and letters)
/// 2. Arabic-Indic (U+0660..U+0669) and Extended Arabic-Indic (U+06F0..U+06F9)
///    digits become ASCII digits
/// 3. Whitespace is removed entirely
pub fn normalize_id_number(s: &str) -> String {
    s.nfkc()
        .filter(|c| !c.is_whitespace())
        .map(fold_digit)
        .collect()
}

fn fold_digit(c: char) -> char {
    let offset = match c {
        '\u{0660}'..='\u{0669}' => c as u32 - 0x0660,
        '\u{06F0}'..='\u{06F9}' => c as u32 - 0x06F0,
        _ => return c,
    };
    char::from_digit(offset, 10).unwrap_or(c)
}

/// Trim free text; blank becomes `None`
pub fn normalize_optional_text(s: Option<String>) -> Option<String> {
    s.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
