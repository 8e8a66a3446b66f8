//! Shared types for the ordering platform
//!
//! Common types used by order-server and its clients: error codes and
//! response envelopes, catalog reference models, and the order aggregate.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
