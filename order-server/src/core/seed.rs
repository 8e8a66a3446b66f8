//! 种子数据加载
//!
//! 商品目录、优惠券、积分方案和租户设置由外部子系统维护。独立部署时
//! 从 `{WORK_DIR}/seed.json` 读取一次，目录进入内存快照，其余写入 redb。
//!
//! ```json
//! {
//!   "products": [{"id": 1, "tenant_id": 1, "name": "Burger", "price": "20.00", "is_active": true}],
//!   "tables": [{"id": 1, "tenant_id": 1, "name": "T1", "capacity": 4, "is_active": true}],
//!   "coupons": [],
//!   "loyalty_programs": [],
//!   "tenant_settings": []
//! }
//! ```

use super::error::{Result, ServerError};
use crate::catalog::CatalogSnapshot;
use crate::orders::{OrderStorage, StorageError};
use serde::Deserialize;
use shared::models::{
    Coupon, DiningTable, LoyaltyProgram, Modifier, Product, TenantSettings,
};
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub products: Vec<Product>,
    pub modifiers: Vec<Modifier>,
    pub tables: Vec<DiningTable>,
    pub coupons: Vec<Coupon>,
    pub loyalty_programs: Vec<LoyaltyProgram>,
    pub tenant_settings: Vec<TenantSettings>,
}

/// Load the seed file if present; a missing file is not an error
pub fn load_seed_file(
    path: &Path,
    catalog: &CatalogSnapshot,
    storage: &OrderStorage,
) -> Result<bool> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "No seed file, starting with empty catalog");
        return Ok(false);
    }
    let raw = std::fs::read_to_string(path)?;
    let data: SeedData = serde_json::from_str(&raw)
        .map_err(|e| ServerError::Seed(format!("{}: {}", path.display(), e)))?;
    apply_seed(data, catalog, storage)?;
    Ok(true)
}

pub fn apply_seed(
    data: SeedData,
    catalog: &CatalogSnapshot,
    storage: &OrderStorage,
) -> std::result::Result<(), StorageError> {
    let coupons = data.coupons.len();
    for product in data.products {
        catalog.upsert_product(product);
    }
    for modifier in data.modifiers {
        catalog.upsert_modifier(modifier);
    }
    for table in data.tables {
        catalog.upsert_table(table);
    }
    for coupon in &data.coupons {
        storage.store_coupon(coupon)?;
    }
    for program in &data.loyalty_programs {
        storage.store_loyalty_program(program)?;
    }
    for settings in &data.tenant_settings {
        storage.store_tenant_settings(settings)?;
    }

    let (products, modifiers, tables) = catalog.counts();
    tracing::info!(products, modifiers, tables, coupons, "Seed data loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogReader;

    const SEED: &str = r#"{
        "products": [
            {"id": 1, "tenant_id": 1, "name": "Burger", "price": "20.00", "is_active": true},
            {"id": 2, "tenant_id": 1, "name": "Soda", "price": 3.5, "is_active": true}
        ],
        "tables": [{"id": 1, "tenant_id": 1, "name": "T1", "capacity": 4, "is_active": true}],
        "coupons": [
            {"id": 7, "tenant_id": 1, "code": "TEN", "discount_type": "PERCENTAGE",
             "value": "10", "is_active": true}
        ]
    }"#;

    #[test]
    fn test_load_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, SEED).unwrap();

        let catalog = CatalogSnapshot::new();
        let storage = OrderStorage::open(dir.path().join("orders.redb")).unwrap();
        assert!(load_seed_file(&path, &catalog, &storage).unwrap());

        assert_eq!(catalog.counts(), (2, 0, 1));
        let soda = catalog.get_product(1, 2).unwrap().unwrap();
        assert_eq!(soda.price, rust_decimal::Decimal::new(35, 1));
        let coupon = storage.get_coupon(7).unwrap().unwrap();
        assert_eq!(coupon.usage_count, 0);
        assert!(coupon.usage_limit.is_none());
    }

    #[test]
    fn test_missing_seed_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CatalogSnapshot::new();
        let storage = OrderStorage::open(dir.path().join("orders.redb")).unwrap();

        let loaded = load_seed_file(&dir.path().join("seed.json"), &catalog, &storage).unwrap();
        assert!(!loaded);
        assert_eq!(catalog.counts(), (0, 0, 0));
    }

    #[test]
    fn test_malformed_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, "{\"products\": 3}").unwrap();
        let catalog = CatalogSnapshot::new();
        let storage = OrderStorage::open(dir.path().join("orders.redb")).unwrap();

        let err = load_seed_file(&path, &catalog, &storage).unwrap_err();
        assert!(matches!(err, ServerError::Seed(_)));
    }
}
