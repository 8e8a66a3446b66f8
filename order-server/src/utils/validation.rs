//! Input validation limits
//!
//! Centralized text length and range constants used by the order validator.

// ── Text length limits ──────────────────────────────────────────────

/// Order and item notes
pub const MAX_NOTE_LEN: usize = 500;

/// Address lines (street, complement, reference)
pub const MAX_ADDRESS_LEN: usize = 200;

/// Short address parts: number, city, postal code
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Coupon codes
pub const MAX_COUPON_CODE_LEN: usize = 50;

/// Idempotency keys
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Rejection reason bounds (characters)
pub const MIN_REJECTION_REASON_LEN: usize = 3;
pub const MAX_REJECTION_REASON_LEN: usize = 200;

// ── Numeric ranges ──────────────────────────────────────────────────

/// Item and modifier quantity bounds
pub const MIN_QUANTITY: i32 = 1;
pub const MAX_QUANTITY: i32 = 99;

/// Estimated preparation minutes bounds
pub const MIN_PREPARATION_MINUTES: i32 = 5;
pub const MAX_PREPARATION_MINUTES: i32 = 300;

/// Paging
pub const MAX_PER_PAGE: u32 = 100;

/// Character count (not bytes), so limits behave the same for non-ASCII text
#[inline]
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Whether an optional text exceeds `max` characters
#[inline]
pub fn exceeds(value: Option<&str>, max: usize) -> bool {
    value.is_some_and(|v| char_len(v) > max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len("桌台"), 2);
    }

    #[test]
    fn test_exceeds() {
        assert!(!exceeds(None, 3));
        assert!(!exceeds(Some("abc"), 3));
        assert!(exceeds(Some("abcd"), 3));
    }
}
