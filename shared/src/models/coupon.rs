//! Coupon Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discount type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// `value` is a percentage of the subtotal (10 = 10%)
    Percentage,
    /// `value` is a fixed amount
    Fixed,
}

/// Coupon entity (code unique per tenant)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: i64,
    pub tenant_id: i64,
    pub code: String,
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub min_order_value: Option<Decimal>,
    pub max_discount_value: Option<Decimal>,
    /// None = unlimited
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub usage_count: u32,
    pub valid_from: Option<i64>,
    pub valid_until: Option<i64>,
    pub is_active: bool,
    #[serde(default)]
    pub first_order_only: bool,
}

impl Coupon {
    /// Whether another redemption fits under the usage limit
    pub fn has_remaining_usage(&self) -> bool {
        self.usage_limit
            .is_none_or(|limit| self.usage_count < limit)
    }

    /// Whether `now` lies before the validity window
    pub fn is_before_window(&self, now: i64) -> bool {
        self.valid_from.is_some_and(|from| now < from)
    }

    /// Whether `now` lies after the validity window
    pub fn is_after_window(&self, now: i64) -> bool {
        self.valid_until.is_some_and(|until| now > until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupon() -> Coupon {
        Coupon {
            id: 1,
            tenant_id: 1,
            code: "TEN".to_string(),
            discount_type: DiscountType::Percentage,
            value: Decimal::from(10),
            min_order_value: None,
            max_discount_value: None,
            usage_limit: Some(2),
            usage_count: 0,
            valid_from: Some(1_000),
            valid_until: Some(2_000),
            is_active: true,
            first_order_only: false,
        }
    }

    #[test]
    fn test_remaining_usage() {
        let mut c = coupon();
        assert!(c.has_remaining_usage());
        c.usage_count = 2;
        assert!(!c.has_remaining_usage());
        c.usage_limit = None;
        assert!(c.has_remaining_usage());
    }

    #[test]
    fn test_validity_window_is_inclusive() {
        let c = coupon();
        assert!(c.is_before_window(999));
        assert!(!c.is_before_window(1_000));
        assert!(!c.is_after_window(2_000));
        assert!(c.is_after_window(2_001));
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "id": 7, "tenant_id": 1, "code": "FIVE", "discount_type": "FIXED",
            "value": "5.00", "min_order_value": null, "max_discount_value": null,
            "usage_limit": null, "valid_from": null, "valid_until": null,
            "is_active": true
        }"#;
        let c: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(c.usage_count, 0);
        assert!(!c.first_order_only);
        assert_eq!(c.value, Decimal::new(500, 2));
    }
}
