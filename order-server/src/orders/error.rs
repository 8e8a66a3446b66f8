//! Typed business failures of order operations
//!
//! Every variant maps onto one [`ErrorCode`]; the message names the
//! offending entity so it can be shown to the caller verbatim.

use rust_decimal::Decimal;
use shared::error::{ErrorCode, ErrorKind};
use shared::order::{OrderKind, OrderStatus};
use thiserror::Error;

/// Expected business violations (never infrastructure)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    // ========== Cart ==========
    #[error("Order must contain at least one item")]
    EmptyOrder,

    #[error("Quantity must be between 1 and 99, got {0}")]
    InvalidQuantity(i32),

    #[error("Product {0} not found")]
    ProductNotFound(i64),

    #[error("Product '{0}' is not available")]
    ProductInactive(String),

    #[error("Modifier {0} not found")]
    ModifierNotFound(i64),

    // ========== Kind-specific fields ==========
    #[error("Table is required for table service orders")]
    TableRequired,

    #[error("Table {0} not found")]
    TableNotFound(i64),

    #[error("Delivery address is required for delivery orders")]
    DeliveryAddressRequired,

    #[error("Invalid delivery address: {0}")]
    DeliveryAddressInvalid(String),

    #[error("Field '{field}' is not allowed for {kind:?} orders")]
    FieldNotAllowed { field: &'static str, kind: OrderKind },

    #[error("Field '{field}' exceeds {max} characters")]
    TextTooLong { field: &'static str, max: usize },

    #[error("Delivery fee must be a non-negative amount with at most 2 decimal places")]
    InvalidDeliveryFee,

    // ========== Coupon ==========
    #[error("Coupon '{0}' not found")]
    CouponNotFound(String),

    #[error("Coupon '{0}' is not active")]
    CouponInactive(String),

    #[error("Coupon '{0}' is not valid yet")]
    CouponNotYetValid(String),

    #[error("Coupon '{0}' has expired")]
    CouponExpired(String),

    #[error("Coupon '{0}' has reached its usage limit")]
    CouponUsageLimitReached(String),

    #[error("Coupon '{code}' requires a minimum order of {min_order_value}")]
    CouponMinOrderNotMet { code: String, min_order_value: Decimal },

    #[error("Coupon '{0}' is only valid on a first order")]
    CouponFirstOrderOnly(String),

    // ========== Lifecycle ==========
    #[error("Order {0} not found")]
    OrderNotFound(i64),

    #[error("Order cannot be edited in status {0}")]
    OrderNotEditable(OrderStatus),

    #[error("Field '{0}' cannot be edited")]
    FieldNotEditable(&'static str),

    #[error("Only pending orders can be accepted, current status is {0}")]
    InvalidStatusForAccept(OrderStatus),

    #[error("Only pending orders can be rejected, current status is {0}")]
    InvalidStatusForReject(OrderStatus),

    #[error("Cannot transition order from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order status is {actual}, expected {expected}")]
    StaleStatus {
        expected: OrderStatus,
        actual: OrderStatus,
    },

    #[error("Estimated preparation time must be between 5 and 300 minutes, got {0}")]
    InvalidPreparationTime(i32),

    #[error("Rejection reason must be between 3 and 200 characters")]
    InvalidRejectionReason,
}

impl OrderError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyOrder => ErrorCode::OrderEmpty,
            Self::InvalidQuantity(_) => ErrorCode::InvalidQuantity,
            Self::ProductNotFound(_) => ErrorCode::ProductNotFound,
            Self::ProductInactive(_) => ErrorCode::ProductInactive,
            Self::ModifierNotFound(_) => ErrorCode::ModifierNotFound,
            Self::TableRequired => ErrorCode::TableRequired,
            Self::TableNotFound(_) => ErrorCode::TableNotFound,
            Self::DeliveryAddressRequired => ErrorCode::DeliveryAddressRequired,
            Self::DeliveryAddressInvalid(_) => ErrorCode::DeliveryAddressInvalid,
            Self::FieldNotAllowed { .. } => ErrorCode::InvalidRequest,
            Self::TextTooLong { .. } | Self::InvalidDeliveryFee => ErrorCode::ValueOutOfRange,
            Self::CouponNotFound(_) => ErrorCode::CouponNotFound,
            Self::CouponInactive(_) => ErrorCode::CouponInactive,
            Self::CouponNotYetValid(_) => ErrorCode::CouponNotYetValid,
            Self::CouponExpired(_) => ErrorCode::CouponExpired,
            Self::CouponUsageLimitReached(_) => ErrorCode::CouponUsageLimitReached,
            Self::CouponMinOrderNotMet { .. } => ErrorCode::CouponMinOrderNotMet,
            Self::CouponFirstOrderOnly(_) => ErrorCode::CouponFirstOrderOnly,
            Self::OrderNotFound(_) => ErrorCode::OrderNotFound,
            Self::OrderNotEditable(_) => ErrorCode::OrderNotEditable,
            Self::FieldNotEditable(_) => ErrorCode::FieldNotEditable,
            Self::InvalidStatusForAccept(_) => ErrorCode::InvalidStatusForAccept,
            Self::InvalidStatusForReject(_) => ErrorCode::InvalidStatusForReject,
            Self::InvalidStatusTransition { .. } => ErrorCode::InvalidStatusTransition,
            Self::StaleStatus { .. } => ErrorCode::StaleOrderStatus,
            Self::InvalidPreparationTime(_) => ErrorCode::InvalidPreparationTime,
            Self::InvalidRejectionReason => ErrorCode::InvalidRejectionReason,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
}
