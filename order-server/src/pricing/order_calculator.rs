//! Order-Level Price Calculator
//!
//! Combines line subtotals, coupon discount and delivery fee into the order totals.
//!
//! # Calculation Steps
//!
//! 1. subtotal = round(Σ line subtotals)
//! 2. raw discount: percentage ⇒ subtotal × value / 100, fixed ⇒ value
//! 3. discount = min(raw, floor(min(max_discount_value, subtotal)))
//! 4. delivery fee = round(fee) for Delivery, else 0
//! 5. total = round(max(0, subtotal + fee − discount))
//!
//! The stored discount is the amount the total was actually reduced by, so
//! `total == subtotal + delivery_fee − discount_amount` holds exactly after
//! rounding. Subtotal and fee are on the 2-decimal grid, so that amount is
//! `discount` moved onto the grid and never passes the floored bound of
//! step 3.

use rust_decimal::prelude::*;
use shared::models::{Coupon, DiscountType};
use shared::order::OrderKind;

use super::item_calculator::{PricingLine, line_subtotal};
use super::{floor_money, pad_money, round_money};

/// Discount terms of an applied coupon
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountTerms {
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub max_discount_value: Option<Decimal>,
}

impl From<&Coupon> for DiscountTerms {
    fn from(coupon: &Coupon) -> Self {
        Self {
            discount_type: coupon.discount_type,
            value: coupon.value,
            max_discount_value: coupon.max_discount_value,
        }
    }
}

/// Pricing input
#[derive(Debug, Clone, PartialEq)]
pub struct PricingInput {
    pub lines: Vec<PricingLine>,
    pub discount: Option<DiscountTerms>,
    pub kind: OrderKind,
    /// Resolved fee (explicit or tenant default); ignored unless Delivery
    pub delivery_fee: Decimal,
}

/// Result of order price calculation
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    /// Per-line subtotals, same order as the input lines
    pub line_subtotals: Vec<Decimal>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
}

/// Raw discount capped by the coupon maximum and the subtotal
///
/// The cap is floored to 2 decimal places, so a discount at the cap stays
/// within it once the total is rounded.
pub fn compute_discount(subtotal: Decimal, terms: &DiscountTerms) -> Decimal {
    let raw = match terms.discount_type {
        DiscountType::Percentage => subtotal * terms.value / Decimal::ONE_HUNDRED,
        DiscountType::Fixed => terms.value,
    };
    let bound = match terms.max_discount_value {
        Some(max) => max.min(subtotal),
        None => subtotal,
    };
    raw.min(floor_money(bound.max(Decimal::ZERO)))
        .max(Decimal::ZERO)
}

/// Delivery fee applicable to an order kind
#[inline]
pub fn applicable_delivery_fee(kind: OrderKind, fee: Decimal) -> Decimal {
    match kind {
        OrderKind::Delivery => fee.max(Decimal::ZERO),
        OrderKind::Pickup | OrderKind::TableService => Decimal::ZERO,
    }
}

/// Price an order
pub fn calculate_order(input: &PricingInput) -> PriceBreakdown {
    let line_subtotals: Vec<Decimal> = input.lines.iter().map(line_subtotal).collect();
    // 目录价格为两位小数时不改变数值
    let subtotal = round_money(line_subtotals.iter().copied().sum());

    let discount = input
        .discount
        .as_ref()
        .map(|terms| compute_discount(subtotal, terms))
        .unwrap_or(Decimal::ZERO);
    let delivery_fee = round_money(applicable_delivery_fee(input.kind, input.delivery_fee));

    let gross = subtotal + delivery_fee;
    let total = round_money((gross - discount).max(Decimal::ZERO));
    let discount_amount = pad_money(gross - total);

    PriceBreakdown {
        line_subtotals: line_subtotals.into_iter().map(pad_money).collect(),
        subtotal,
        delivery_fee,
        discount_amount,
        total,
    }
}
