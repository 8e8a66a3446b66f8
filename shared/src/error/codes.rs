//! Unified error codes for the ordering platform
//!
//! This module defines all error codes used across order-server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Tenant errors
//! - 4xxx: Order errors
//! - 5xxx: Coupon errors
//! - 6xxx: Product / modifier errors
//! - 7xxx: Table errors
//! - 8xxx: Loyalty errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 3xxx: Tenant ====================
    /// Tenant not selected (missing tenant header)
    TenantNotSelected = 3001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4007,
    /// Order is not in an editable status
    OrderNotEditable = 4008,
    /// Field cannot be changed after creation
    FieldNotEditable = 4009,
    /// Status change not allowed by the transition table
    InvalidStatusTransition = 4010,
    /// Accept requires a Pending order
    InvalidStatusForAccept = 4011,
    /// Reject requires a Pending order
    InvalidStatusForReject = 4012,
    /// Committed status moved on since the caller read it
    StaleOrderStatus = 4013,
    /// Item or modifier quantity out of range
    InvalidQuantity = 4014,
    /// Estimated preparation minutes out of range
    InvalidPreparationTime = 4015,
    /// Rejection reason missing or out of range
    InvalidRejectionReason = 4016,
    /// Delivery order without address
    DeliveryAddressRequired = 4017,
    /// Delivery address malformed
    DeliveryAddressInvalid = 4018,

    // ==================== 5xxx: Coupon ====================
    /// Coupon not found
    CouponNotFound = 5001,
    /// Coupon is disabled
    CouponInactive = 5002,
    /// Coupon validity window has ended
    CouponExpired = 5003,
    /// Coupon validity window has not started
    CouponNotYetValid = 5004,
    /// Coupon usage limit reached
    CouponUsageLimitReached = 5005,
    /// Order subtotal below coupon minimum
    CouponMinOrderNotMet = 5006,
    /// Coupon only valid for a customer's first order
    CouponFirstOrderOnly = 5007,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product is not available
    ProductInactive = 6004,
    /// Modifier (addon / additional) not found
    ModifierNotFound = 6301,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table service order without table
    TableRequired = 7005,

    // ==================== 8xxx: Loyalty ====================
    /// Loyalty ledger could not record the accrual
    LoyaltyAccrualFailed = 8001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,

    // ==================== 94xx: Storage ====================
    /// Storage full (disk space insufficient)
    StorageFull = 9401,
    /// Out of memory
    OutOfMemory = 9402,
    /// Storage corrupted (data file damaged)
    StorageCorrupted = 9403,
    /// System busy (IO error, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Tenant
            ErrorCode::TenantNotSelected => "No tenant selected",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::OrderNotEditable => "Order can no longer be edited",
            ErrorCode::FieldNotEditable => "Field cannot be edited",
            ErrorCode::InvalidStatusTransition => "Invalid status transition",
            ErrorCode::InvalidStatusForAccept => "Only pending orders can be accepted",
            ErrorCode::InvalidStatusForReject => "Only pending orders can be rejected",
            ErrorCode::StaleOrderStatus => "Order status changed concurrently",
            ErrorCode::InvalidQuantity => "Quantity is invalid",
            ErrorCode::InvalidPreparationTime => "Estimated preparation time is out of range",
            ErrorCode::InvalidRejectionReason => "Rejection reason is invalid",
            ErrorCode::DeliveryAddressRequired => "Delivery address is required",
            ErrorCode::DeliveryAddressInvalid => "Delivery address is invalid",

            // Coupon
            ErrorCode::CouponNotFound => "Coupon not found",
            ErrorCode::CouponInactive => "Coupon is not active",
            ErrorCode::CouponExpired => "Coupon has expired",
            ErrorCode::CouponNotYetValid => "Coupon is not valid yet",
            ErrorCode::CouponUsageLimitReached => "Coupon usage limit reached",
            ErrorCode::CouponMinOrderNotMet => "Order does not reach the coupon minimum",
            ErrorCode::CouponFirstOrderOnly => "Coupon is only valid for a first order",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInactive => "Product is not available",
            ErrorCode::ModifierNotFound => "Modifier not found",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableRequired => "Table is required for table service orders",

            // Loyalty
            ErrorCode::LoyaltyAccrualFailed => "Loyalty accrual failed",

            // System
            ErrorCode::InternalError => "Internal server error",

            // Storage
            ErrorCode::StorageFull => "Storage full (disk space insufficient)",
            ErrorCode::OutOfMemory => "Out of memory",
            ErrorCode::StorageCorrupted => "Storage corrupted (data file damaged)",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Tenant
            3001 => Ok(ErrorCode::TenantNotSelected),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderNotEditable),
            4009 => Ok(ErrorCode::FieldNotEditable),
            4010 => Ok(ErrorCode::InvalidStatusTransition),
            4011 => Ok(ErrorCode::InvalidStatusForAccept),
            4012 => Ok(ErrorCode::InvalidStatusForReject),
            4013 => Ok(ErrorCode::StaleOrderStatus),
            4014 => Ok(ErrorCode::InvalidQuantity),
            4015 => Ok(ErrorCode::InvalidPreparationTime),
            4016 => Ok(ErrorCode::InvalidRejectionReason),
            4017 => Ok(ErrorCode::DeliveryAddressRequired),
            4018 => Ok(ErrorCode::DeliveryAddressInvalid),

            // Coupon
            5001 => Ok(ErrorCode::CouponNotFound),
            5002 => Ok(ErrorCode::CouponInactive),
            5003 => Ok(ErrorCode::CouponExpired),
            5004 => Ok(ErrorCode::CouponNotYetValid),
            5005 => Ok(ErrorCode::CouponUsageLimitReached),
            5006 => Ok(ErrorCode::CouponMinOrderNotMet),
            5007 => Ok(ErrorCode::CouponFirstOrderOnly),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6004 => Ok(ErrorCode::ProductInactive),
            6301 => Ok(ErrorCode::ModifierNotFound),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7005 => Ok(ErrorCode::TableRequired),

            // Loyalty
            8001 => Ok(ErrorCode::LoyaltyAccrualFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),

            // Storage
            9401 => Ok(ErrorCode::StorageFull),
            9402 => Ok(ErrorCode::OutOfMemory),
            9403 => Ok(ErrorCode::StorageCorrupted),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::TenantNotSelected.code(), 3001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::InvalidStatusTransition.code(), 4010);
        assert_eq!(ErrorCode::CouponNotFound.code(), 5001);
        assert_eq!(ErrorCode::ProductNotFound.code(), 6001);
        assert_eq!(ErrorCode::TableRequired.code(), 7005);
        assert_eq!(ErrorCode::LoyaltyAccrualFailed.code(), 8001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::SystemBusy.code(), 9404);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::OrderNotFound.is_success());
    }

    #[test]
    fn test_try_from_covers_every_variant() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::InvalidRequest,
            ErrorCode::ValueOutOfRange,
            ErrorCode::TenantNotSelected,
            ErrorCode::OrderNotFound,
            ErrorCode::OrderEmpty,
            ErrorCode::OrderNotEditable,
            ErrorCode::FieldNotEditable,
            ErrorCode::InvalidStatusTransition,
            ErrorCode::InvalidStatusForAccept,
            ErrorCode::InvalidStatusForReject,
            ErrorCode::StaleOrderStatus,
            ErrorCode::InvalidQuantity,
            ErrorCode::InvalidPreparationTime,
            ErrorCode::InvalidRejectionReason,
            ErrorCode::DeliveryAddressRequired,
            ErrorCode::DeliveryAddressInvalid,
            ErrorCode::CouponNotFound,
            ErrorCode::CouponInactive,
            ErrorCode::CouponExpired,
            ErrorCode::CouponNotYetValid,
            ErrorCode::CouponUsageLimitReached,
            ErrorCode::CouponMinOrderNotMet,
            ErrorCode::CouponFirstOrderOnly,
            ErrorCode::ProductNotFound,
            ErrorCode::ProductInactive,
            ErrorCode::ModifierNotFound,
            ErrorCode::TableNotFound,
            ErrorCode::TableRequired,
            ErrorCode::LoyaltyAccrualFailed,
            ErrorCode::InternalError,
            ErrorCode::StorageFull,
            ErrorCode::OutOfMemory,
            ErrorCode::StorageCorrupted,
            ErrorCode::SystemBusy,
        ];

        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(1001), Err(InvalidErrorCode(1001)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");

        let json = serde_json::to_string(&ErrorCode::Success).unwrap();
        assert_eq!(json, "0");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("4010").unwrap();
        assert_eq!(code, ErrorCode::InvalidStatusTransition);

        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::TableRequired), "7005");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(ErrorCode::OrderNotFound.message(), "Order not found");
        assert_eq!(ErrorCode::InternalError.message(), "Internal server error");
    }
}
