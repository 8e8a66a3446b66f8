//! Order lifecycle module
//!
//! - **validation**: per-request validators (catalog, coupon and kind checks)
//! - **aggregate**: order construction, editable-field updates, invariants
//! - **transitions**: static status transition table
//! - **manager**: OrdersManager, one write transaction per operation
//! - **coupons** / **loyalty**: adapters to the marketing and loyalty subsystems
//! - **queue**: TableService queue positions
//! - **storage**: redb persistence
//!
//! # Architecture
//!
//! ```text
//! Request → OrdersManager ─┬─ Validator ── CatalogReader / CouponStore
//!                          ├─ Pricing Calculator
//!                          ├─ Transition table ── Loyalty / Queue / Refund flag
//!                          └─ Storage (redb, single WriteTransaction)
//! ```

pub mod aggregate;
pub mod coupons;
pub mod error;
pub mod loyalty;
pub mod manager;
pub mod queue;
pub mod storage;
pub mod transitions;
pub mod validation;

// Re-exports
pub use coupons::{CouponStore, RedbCouponStore};
pub use error::OrderError;
pub use loyalty::{LoyaltyError, LoyaltyLedger, RedbLoyaltyLedger};
pub use manager::{CreateOutcome, ManagerError, ManagerResult, OrdersManager};
pub use storage::{OrderStorage, StorageError};
