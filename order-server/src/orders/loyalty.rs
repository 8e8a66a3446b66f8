//! Loyalty Ledger adapter
//!
//! Points accrue when an order is delivered. The program configuration and
//! the ledger live in the loyalty subsystem; accrual runs inside the status
//! transition's write transaction so a failure here aborts the transition.

use super::storage::{OrderStorage, StorageError};
use redb::WriteTransaction;
use rust_decimal::prelude::*;
use shared::models::{LoyaltyEntry, LoyaltyProgram, LoyaltyReason};
use shared::order::Order;
use shared::util::{DAY_MS, snowflake_id};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoyaltyError {
    #[error("Loyalty storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Loyalty ledger unavailable: {0}")]
    Unavailable(String),
}

pub type LoyaltyResult<T> = Result<T, LoyaltyError>;

pub trait LoyaltyLedger: Send + Sync {
    /// Tenant's program configuration, if any
    fn program(&self, txn: &WriteTransaction, tenant_id: i64)
    -> LoyaltyResult<Option<LoyaltyProgram>>;

    /// Record a point delta
    fn accrue(&self, txn: &WriteTransaction, entry: &LoyaltyEntry) -> LoyaltyResult<()>;

    /// Sum of non-expired entries
    fn balance(&self, tenant_id: i64, customer_id: i64, now: i64) -> LoyaltyResult<i64>;
}

/// Points earned for an order total: floor(total × points_per_unit)
///
/// Zero when the program is inactive or the total is below its minimum.
pub fn points_for(program: &LoyaltyProgram, total: Decimal) -> i64 {
    if !program.is_active || total < program.min_order_value {
        return 0;
    }
    (total * program.points_per_unit)
        .floor()
        .to_i64()
        .unwrap_or(0)
        .max(0)
}

/// Ledger entry for a delivered order, `None` when nothing accrues
pub fn accrual_entry(program: &LoyaltyProgram, order: &Order, now: i64) -> Option<LoyaltyEntry> {
    let customer_id = order.customer_id?;
    let points = points_for(program, order.total);
    if points == 0 {
        return None;
    }
    Some(LoyaltyEntry {
        id: snowflake_id(),
        tenant_id: order.tenant_id,
        customer_id,
        points,
        reason: LoyaltyReason::OrderCompleted,
        order_id: Some(order.id),
        expires_at: program
            .validity_days
            .map(|days| now + i64::from(days) * DAY_MS),
        created_at: now,
    })
}

/// Ledger stored in the order database
#[derive(Debug, Clone)]
pub struct RedbLoyaltyLedger {
    storage: OrderStorage,
}

impl RedbLoyaltyLedger {
    pub fn new(storage: OrderStorage) -> Self {
        Self { storage }
    }
}

impl LoyaltyLedger for RedbLoyaltyLedger {
    fn program(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
    ) -> LoyaltyResult<Option<LoyaltyProgram>> {
        Ok(self.storage.get_loyalty_program_txn(txn, tenant_id)?)
    }

    fn accrue(&self, txn: &WriteTransaction, entry: &LoyaltyEntry) -> LoyaltyResult<()> {
        self.storage.append_loyalty_entry_txn(txn, entry)?;
        tracing::debug!(
            tenant_id = entry.tenant_id,
            customer_id = entry.customer_id,
            points = entry.points,
            order_id = ?entry.order_id,
            "Loyalty points accrued"
        );
        Ok(())
    }

    fn balance(&self, tenant_id: i64, customer_id: i64, now: i64) -> LoyaltyResult<i64> {
        let entries = self.storage.get_loyalty_entries(tenant_id, customer_id)?;
        Ok(entries
            .iter()
            .filter(|e| e.is_live(now))
            .map(|e| e.points)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(min: i64) -> LoyaltyProgram {
        LoyaltyProgram {
            tenant_id: 1,
            points_per_unit: Decimal::ONE,
            min_order_value: Decimal::from(min),
            validity_days: Some(30),
            is_active: true,
        }
    }

    #[test]
    fn test_points_floor_of_total() {
        assert_eq!(points_for(&program(10), Decimal::new(5099, 2)), 50);
        let mut double = program(0);
        double.points_per_unit = Decimal::new(15, 1);
        assert_eq!(points_for(&double, Decimal::from(3)), 4);
    }

    #[test]
    fn test_no_points_below_minimum_or_inactive() {
        assert_eq!(points_for(&program(10), Decimal::new(999, 2)), 0);
        let mut inactive = program(0);
        inactive.is_active = false;
        assert_eq!(points_for(&inactive, Decimal::from(100)), 0);
    }

    #[test]
    fn test_balance_ignores_expired_entries() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let ledger = RedbLoyaltyLedger::new(storage.clone());
        for (id, points, expires_at) in [(1, 50, Some(100)), (2, 20, None), (3, -5, None)] {
            storage
                .append_loyalty_entry(&LoyaltyEntry {
                    id,
                    tenant_id: 1,
                    customer_id: 7,
                    points,
                    reason: LoyaltyReason::Adjustment,
                    order_id: None,
                    expires_at,
                    created_at: 0,
                })
                .unwrap();
        }
        assert_eq!(ledger.balance(1, 7, 50).unwrap(), 65);
        assert_eq!(ledger.balance(1, 7, 100).unwrap(), 15);
        assert_eq!(ledger.balance(2, 7, 50).unwrap(), 0);
    }
}
