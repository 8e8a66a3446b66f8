//! Pricing Calculator
//!
//! Pure, deterministic order pricing:
//! - item subtotal = unit price × quantity + Σ(modifier unit price × modifier quantity)
//! - subtotal = Σ item subtotals
//! - discount from an optional coupon, capped by the coupon maximum and the subtotal
//! - delivery fee only for delivery orders
//! - total = subtotal + delivery fee − discount, floored at 0
//!
//! All arithmetic uses `rust_decimal`. Subtotal and delivery fee are kept on
//! the 2-decimal grid, the discount bound is floored onto it, and only the
//! final total is rounded (half-up).

mod item_calculator;
mod order_calculator;

pub use item_calculator::*;
pub use order_calculator::*;

use rust_decimal::prelude::*;

/// Monetary precision
pub const DECIMAL_PLACES: u32 = 2;

/// Round to 2 decimal places, half-up (amounts are non-negative)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

/// Truncate to 2 decimal places (amounts are non-negative)
#[inline]
pub fn floor_money(value: Decimal) -> Decimal {
    let mut floored = value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::ToZero);
    floored.rescale(DECIMAL_PLACES);
    floored
}

/// Whether a value is already on the 2-decimal grid
#[inline]
pub fn is_money(value: Decimal) -> bool {
    value.normalize().scale() <= DECIMAL_PLACES
}

/// Pad to 2 decimal places for display without rounding away precision
#[inline]
pub fn pad_money(value: Decimal) -> Decimal {
    if value.scale() < DECIMAL_PLACES {
        let mut padded = value;
        padded.rescale(DECIMAL_PLACES);
        padded
    } else {
        value
    }
}
