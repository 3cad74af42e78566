//! Denomination format rules.

/// Shortest accepted symbol.
pub const MIN_SYMBOL_LEN: usize = 2;
/// Longest accepted symbol.
pub const MAX_SYMBOL_LEN: usize = 16;

/// Checks the symbol format: lowercase ASCII letter followed by lowercase
/// letters or digits, 2 to 16 characters.
#[must_use]
pub fn is_valid_symbol(symbol: &str) -> bool {
    let bytes = symbol.as_bytes();
    if !(MIN_SYMBOL_LEN..=MAX_SYMBOL_LEN).contains(&bytes.len()) {
        return false;
    }
    bytes[0].is_ascii_lowercase()
        && bytes[1..]
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}
