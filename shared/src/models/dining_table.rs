//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity (桌台)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    pub tenant_id: i64,
    pub name: String,
    pub capacity: i32,
    pub is_active: bool,
}
