//! Item-Level Price Calculator

use rust_decimal::prelude::*;

/// Modifier selection priced from its snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct PricingModifier {
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// Cart line priced from its snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct PricingLine {
    pub unit_price: Decimal,
    pub quantity: i32,
    pub modifiers: Vec<PricingModifier>,
}

/// Modifier subtotal = unit price × quantity
#[inline]
pub fn modifier_subtotal(modifier: &PricingModifier) -> Decimal {
    modifier.unit_price * Decimal::from(modifier.quantity)
}

/// Item subtotal = unit price × quantity + Σ modifier subtotals
///
/// Modifier quantities are per line, not per unit.
pub fn line_subtotal(line: &PricingLine) -> Decimal {
    let base = line.unit_price * Decimal::from(line.quantity);
    line.modifiers
        .iter()
        .map(modifier_subtotal)
        .fold(base, |acc, m| acc + m)
}

/// Order subtotal = Σ item subtotals
pub fn order_subtotal(lines: &[PricingLine]) -> Decimal {
    lines.iter().map(line_subtotal).sum()
}
