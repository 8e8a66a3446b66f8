//! Catalog snapshot reader
//!
//! Read-only product, modifier and table lookups scoped by tenant. The
//! catalog itself is owned by an external subsystem; order-server only
//! reads it through [`CatalogReader`]. [`CatalogSnapshot`] is the in-memory
//! implementation, filled at startup from the seed file.

use parking_lot::RwLock;
use shared::models::{DiningTable, Modifier, Product};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Catalog adapter errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Tenant-scoped catalog lookups
///
/// `Ok(None)` means the entity does not exist for that tenant. Products and
/// tables are returned even when inactive so callers can tell "unknown" from
/// "not available"; modifiers are only returned while active.
pub trait CatalogReader: Send + Sync {
    fn get_product(&self, tenant_id: i64, product_id: i64) -> CatalogResult<Option<Product>>;

    fn get_active_modifier(
        &self,
        tenant_id: i64,
        modifier_id: i64,
    ) -> CatalogResult<Option<Modifier>>;

    fn get_table(&self, tenant_id: i64, table_id: i64) -> CatalogResult<Option<DiningTable>>;
}

/// In-memory catalog keyed by (tenant_id, id)
#[derive(Clone, Default)]
pub struct CatalogSnapshot {
    products: Arc<RwLock<HashMap<(i64, i64), Product>>>,
    modifiers: Arc<RwLock<HashMap<(i64, i64), Modifier>>>,
    tables: Arc<RwLock<HashMap<(i64, i64), DiningTable>>>,
}

impl std::fmt::Debug for CatalogSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogSnapshot")
            .field("products", &self.products.read().len())
            .field("modifiers", &self.modifiers.read().len())
            .field("tables", &self.tables.read().len())
            .finish()
    }
}

impl CatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_product(&self, product: Product) {
        self.products
            .write()
            .insert((product.tenant_id, product.id), product);
    }

    pub fn upsert_modifier(&self, modifier: Modifier) {
        self.modifiers
            .write()
            .insert((modifier.tenant_id, modifier.id), modifier);
    }

    pub fn upsert_table(&self, table: DiningTable) {
        self.tables.write().insert((table.tenant_id, table.id), table);
    }

    /// (products, modifiers, tables)
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.products.read().len(),
            self.modifiers.read().len(),
            self.tables.read().len(),
        )
    }
}

impl CatalogReader for CatalogSnapshot {
    fn get_product(&self, tenant_id: i64, product_id: i64) -> CatalogResult<Option<Product>> {
        Ok(self.products.read().get(&(tenant_id, product_id)).cloned())
    }

    fn get_active_modifier(
        &self,
        tenant_id: i64,
        modifier_id: i64,
    ) -> CatalogResult<Option<Modifier>> {
        Ok(self
            .modifiers
            .read()
            .get(&(tenant_id, modifier_id))
            .filter(|m| m.is_active)
            .cloned())
    }

    fn get_table(&self, tenant_id: i64, table_id: i64) -> CatalogResult<Option<DiningTable>> {
        Ok(self.tables.read().get(&(tenant_id, table_id)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::ModifierKind;

    #[test]
    fn test_lookups_are_tenant_scoped() {
        let catalog = CatalogSnapshot::new();
        catalog.upsert_product(Product {
            id: 1,
            tenant_id: 10,
            name: "Latte".to_string(),
            price: Decimal::new(350, 2),
            is_active: true,
        });

        assert!(catalog.get_product(10, 1).unwrap().is_some());
        assert!(catalog.get_product(11, 1).unwrap().is_none());
    }

    #[test]
    fn test_inactive_modifier_is_not_returned() {
        let catalog = CatalogSnapshot::new();
        catalog.upsert_modifier(Modifier {
            id: 5,
            tenant_id: 10,
            kind: ModifierKind::Addon,
            name: "Oat milk".to_string(),
            price: Decimal::new(50, 2),
            is_active: false,
        });

        assert!(catalog.get_active_modifier(10, 5).unwrap().is_none());
        assert_eq!(catalog.counts(), (0, 1, 0));
    }
}
