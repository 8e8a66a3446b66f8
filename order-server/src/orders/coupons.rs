//! Coupon Store adapter
//!
//! Coupon CRUD belongs to the marketing subsystem; orders only look coupons
//! up by code and consume one use per created order.

use super::storage::{OrderStorage, StorageResult};
use redb::WriteTransaction;
use shared::models::Coupon;

/// Coupon lookups and usage accounting inside the operation's transaction
pub trait CouponStore: Send + Sync {
    /// Tenant-scoped lookup, code matched case-insensitively
    fn get_by_code(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
        code: &str,
    ) -> StorageResult<Option<Coupon>>;

    /// Increment usage if still under the limit
    ///
    /// Returns `false` when the limit was already reached (or the coupon is
    /// gone); the count is left untouched in that case.
    fn increment_usage(&self, txn: &WriteTransaction, coupon_id: i64) -> StorageResult<bool>;
}

/// redb-backed coupon store sharing the order database
#[derive(Debug, Clone)]
pub struct RedbCouponStore {
    storage: OrderStorage,
}

impl RedbCouponStore {
    pub fn new(storage: OrderStorage) -> Self {
        Self { storage }
    }
}

impl CouponStore for RedbCouponStore {
    fn get_by_code(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
        code: &str,
    ) -> StorageResult<Option<Coupon>> {
        self.storage.get_coupon_by_code_txn(txn, tenant_id, code)
    }

    fn increment_usage(&self, txn: &WriteTransaction, coupon_id: i64) -> StorageResult<bool> {
        // redb 单写者：事务内 读-判断-写 即为原子的 increment-with-limit
        let Some(mut coupon) = self.storage.get_coupon_txn(txn, coupon_id)? else {
            return Ok(false);
        };
        if !coupon.has_remaining_usage() {
            return Ok(false);
        }
        coupon.usage_count += 1;
        self.storage.store_coupon_txn(txn, &coupon)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::DiscountType;

    fn coupon(usage_limit: Option<u32>) -> Coupon {
        Coupon {
            id: 1,
            tenant_id: 1,
            code: "ONCE".to_string(),
            discount_type: DiscountType::Fixed,
            value: Decimal::from(2),
            min_order_value: None,
            max_discount_value: None,
            usage_limit,
            usage_count: 0,
            valid_from: None,
            valid_until: None,
            is_active: true,
            first_order_only: false,
        }
    }

    #[test]
    fn test_increment_stops_at_limit() {
        let storage = OrderStorage::open_in_memory().unwrap();
        storage.store_coupon(&coupon(Some(1))).unwrap();
        let store = RedbCouponStore::new(storage.clone());

        let txn = storage.begin_write().unwrap();
        assert!(store.increment_usage(&txn, 1).unwrap());
        assert!(!store.increment_usage(&txn, 1).unwrap());
        txn.commit().unwrap();

        assert_eq!(storage.get_coupon(1).unwrap().unwrap().usage_count, 1);
    }

    #[test]
    fn test_unlimited_coupon_keeps_counting() {
        let storage = OrderStorage::open_in_memory().unwrap();
        storage.store_coupon(&coupon(None)).unwrap();
        let store = RedbCouponStore::new(storage.clone());

        let txn = storage.begin_write().unwrap();
        for _ in 0..3 {
            assert!(store.increment_usage(&txn, 1).unwrap());
        }
        txn.commit().unwrap();

        assert_eq!(storage.get_coupon(1).unwrap().unwrap().usage_count, 3);
    }

    #[test]
    fn test_unknown_coupon_is_not_incremented() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let store = RedbCouponStore::new(storage.clone());
        let txn = storage.begin_write().unwrap();
        assert!(!store.increment_usage(&txn, 42).unwrap());
        assert!(store.get_by_code(&txn, 1, "ONCE").unwrap().is_none());
    }
}
