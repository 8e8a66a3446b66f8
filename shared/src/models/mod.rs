//! Data models
//!
//! Reference entities owned by external subsystems (catalog, coupons,
//! loyalty, tenant settings) as order-server reads them.
//! All IDs are `i64`, all money is `Decimal`, all timestamps are ms since epoch.

pub mod coupon;
pub mod dining_table;
pub mod loyalty;
pub mod product;
pub mod tenant;

// Re-exports
pub use coupon::*;
pub use dining_table::*;
pub use loyalty::*;
pub use product::*;
pub use tenant::*;
