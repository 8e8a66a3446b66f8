//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity as exposed by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub tenant_id: i64,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
}

/// Modifier kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModifierKind {
    /// Addon group option (e.g. extra shot)
    Addon,
    /// Standalone additional (e.g. side sauce)
    Additional,
}

/// Modifier entity (addon option or additional)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub id: i64,
    pub tenant_id: i64,
    pub kind: ModifierKind,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
}
