//! Order aggregate types
//!
//! - [`types`]: status, kind, payment and actor enums
//! - [`aggregate`]: the persisted order with its owned items, history and rejection
//! - [`request`]: caller payloads for create / update / accept / reject / status change

pub mod aggregate;
pub mod request;
pub mod types;

// Re-exports
pub use aggregate::*;
pub use request::*;
pub use types::*;
