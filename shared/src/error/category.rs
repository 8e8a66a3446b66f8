//! Error category and kind classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 3xxx: Tenant errors
/// - 4xxx: Order errors
/// - 5xxx: Coupon errors
/// - 6xxx: Product errors
/// - 7xxx: Table errors
/// - 8xxx: Loyalty errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Tenant errors (3xxx)
    Tenant,
    /// Order errors (4xxx)
    Order,
    /// Coupon errors (5xxx)
    Coupon,
    /// Product errors (6xxx)
    Product,
    /// Table errors (7xxx)
    Table,
    /// Loyalty errors (8xxx)
    Loyalty,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..3000 => Self::General,
            3000..4000 => Self::Tenant,
            4000..5000 => Self::Order,
            5000..6000 => Self::Coupon,
            6000..7000 => Self::Product,
            7000..8000 => Self::Table,
            8000..9000 => Self::Loyalty,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Tenant => "tenant",
            Self::Order => "order",
            Self::Coupon => "coupon",
            Self::Product => "product",
            Self::Table => "table",
            Self::Loyalty => "loyalty",
            Self::System => "system",
        }
    }
}

/// What went wrong, independent of the domain the code belongs to
///
/// Callers branch on the kind rather than on individual codes:
/// a validation failure is the caller's fault and will fail again,
/// a conflict may succeed after re-reading, an infrastructure failure
/// is transient or fatal and is never the caller's fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Infrastructure,
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Get the kind for this error code
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound
            | Self::OrderNotFound
            | Self::CouponNotFound
            | Self::ProductNotFound
            | Self::ModifierNotFound
            | Self::TableNotFound => ErrorKind::NotFound,

            Self::InvalidStatusTransition
            | Self::InvalidStatusForAccept
            | Self::InvalidStatusForReject
            | Self::StaleOrderStatus
            | Self::OrderNotEditable
            | Self::CouponUsageLimitReached => ErrorKind::Conflict,

            Self::Unknown
            | Self::LoyaltyAccrualFailed
            | Self::InternalError
            | Self::StorageFull
            | Self::OutOfMemory
            | Self::StorageCorrupted
            | Self::SystemBusy => ErrorKind::Infrastructure,

            _ => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(8), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);

        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Tenant);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Coupon);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Product);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::Table);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Loyalty);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TenantNotSelected.category(), ErrorCategory::Tenant);
        assert_eq!(ErrorCode::OrderNotFound.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::CouponExpired.category(), ErrorCategory::Coupon);
        assert_eq!(
            ErrorCode::ProductNotFound.category(),
            ErrorCategory::Product
        );
        assert_eq!(ErrorCode::TableRequired.category(), ErrorCategory::Table);
        assert_eq!(
            ErrorCode::LoyaltyAccrualFailed.category(),
            ErrorCategory::Loyalty
        );
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_kind() {
        assert_eq!(ErrorCode::OrderEmpty.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::ProductInactive.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::CouponMinOrderNotMet.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::OrderNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ErrorCode::ProductNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            ErrorCode::InvalidStatusTransition.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(ErrorCode::StaleOrderStatus.kind(), ErrorKind::Conflict);
        assert_eq!(
            ErrorCode::CouponUsageLimitReached.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(ErrorCode::StorageCorrupted.kind(), ErrorKind::Infrastructure);
        assert_eq!(
            ErrorCode::LoyaltyAccrualFailed.kind(),
            ErrorKind::Infrastructure
        );
    }

    #[test]
    fn test_category_name() {
        assert_eq!(ErrorCategory::General.name(), "general");
        assert_eq!(ErrorCategory::Tenant.name(), "tenant");
        assert_eq!(ErrorCategory::Order.name(), "order");
        assert_eq!(ErrorCategory::Coupon.name(), "coupon");
        assert_eq!(ErrorCategory::Product.name(), "product");
        assert_eq!(ErrorCategory::Table.name(), "table");
        assert_eq!(ErrorCategory::Loyalty.name(), "loyalty");
        assert_eq!(ErrorCategory::System.name(), "system");
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Coupon).unwrap();
        assert_eq!(json, "\"coupon\"");

        let category: ErrorCategory = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(category, ErrorCategory::System);
    }

    #[test]
    fn test_kind_serialize() {
        let json = serde_json::to_string(&ErrorKind::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");
    }
}
