//! redb-based storage layer for orders
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `Order` | Order aggregate (items embedded) |
//! | `tenant_orders` | `(tenant_id, order_id)` | `()` | Per-tenant listing index |
//! | `customer_orders` | `(tenant_id, customer_id, order_id)` | `()` | First-order check |
//! | `status_history` | `(order_id, seq)` | `OrderStatusHistory` | Append-only transitions |
//! | `rejections` | `order_id` | `OrderRejection` | At most one per order |
//! | `request_ids` | `(tenant_id, client_request_id)` | `order_id` | Create idempotency |
//! | `coupons` | `coupon_id` | `Coupon` | Coupon rows (usage count) |
//! | `coupon_codes` | `(tenant_id, code)` | `coupon_id` | Code lookup |
//! | `loyalty_programs` | `tenant_id` | `LoyaltyProgram` | Program configuration |
//! | `loyalty_ledger` | `(tenant_id, customer_id, entry_id)` | `LoyaltyEntry` | Point deltas |
//! | `tenant_settings` | `tenant_id` | `TenantSettings` | Delivery defaults |
//! | `counters` | `(tenant_id, name)` | `u64` | Queue position counter |
//! | `active_queue` | `(tenant_id, position)` | `order_id` | Live table service queue |
//!
//! # Transactions
//!
//! Every public order operation runs inside one `WriteTransaction`; the
//! `_txn` methods below read and write through it so validation reads see
//! the same state the commit is based on. redb allows a single writer at a
//! time, which serializes concurrent operations on the same order.

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{Coupon, LoyaltyEntry, LoyaltyProgram, TenantSettings};
use shared::order::{Actor, Order, OrderRejection, OrderStatus, OrderStatusHistory};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Orders: key = order_id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("orders");

/// Tenant index: key = (tenant_id, order_id), snowflake ids keep creation order
const TENANT_ORDERS_TABLE: TableDefinition<(i64, i64), ()> =
    TableDefinition::new("tenant_orders");

/// Customer index: key = (tenant_id, customer_id, order_id)
const CUSTOMER_ORDERS_TABLE: TableDefinition<(i64, i64, i64), ()> =
    TableDefinition::new("customer_orders");

/// Status history: key = (order_id, seq), value = JSON-serialized OrderStatusHistory
const HISTORY_TABLE: TableDefinition<(i64, u32), &[u8]> = TableDefinition::new("status_history");

/// Rejections: key = order_id, value = JSON-serialized OrderRejection
const REJECTIONS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("rejections");

/// Create idempotency: key = (tenant_id, client_request_id), value = order_id
const REQUEST_IDS_TABLE: TableDefinition<(i64, &str), i64> = TableDefinition::new("request_ids");

/// Coupons: key = coupon_id, value = JSON-serialized Coupon
const COUPONS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("coupons");

/// Coupon codes: key = (tenant_id, normalized code), value = coupon_id
const COUPON_CODES_TABLE: TableDefinition<(i64, &str), i64> = TableDefinition::new("coupon_codes");

/// Loyalty programs: key = tenant_id, value = JSON-serialized LoyaltyProgram
const LOYALTY_PROGRAMS_TABLE: TableDefinition<i64, &[u8]> =
    TableDefinition::new("loyalty_programs");

/// Loyalty ledger: key = (tenant_id, customer_id, entry_id), value = JSON-serialized LoyaltyEntry
const LOYALTY_LEDGER_TABLE: TableDefinition<(i64, i64, i64), &[u8]> =
    TableDefinition::new("loyalty_ledger");

/// Tenant settings: key = tenant_id, value = JSON-serialized TenantSettings
const TENANT_SETTINGS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("tenant_settings");

/// Counters: key = (tenant_id, name), value = u64
const COUNTERS_TABLE: TableDefinition<(i64, &str), u64> = TableDefinition::new("counters");

/// Live queue: key = (tenant_id, position), value = order_id
const ACTIVE_QUEUE_TABLE: TableDefinition<(i64, u64), i64> = TableDefinition::new("active_queue");

const QUEUE_COUNTER_KEY: &str = "queue_position";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[inline]
fn encode<T: Serialize>(value: &T) -> StorageResult<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

#[inline]
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> StorageResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Order storage backed by redb
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for OrderStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStorage").finish_non_exhaustive()
    }
}

impl OrderStorage {
    /// Open or create the database at the given path
    ///
    /// redb commits with `Durability::Immediate` by default: once `commit()`
    /// returns the transaction is on disk, and the copy-on-write file is
    /// always in a consistent state.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init_tables(&db)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init_tables(&db)?;
        Ok(Self { db: Arc::new(db) })
    }

    fn init_tables(db: &Database) -> StorageResult<()> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(TENANT_ORDERS_TABLE)?;
            let _ = write_txn.open_table(CUSTOMER_ORDERS_TABLE)?;
            let _ = write_txn.open_table(HISTORY_TABLE)?;
            let _ = write_txn.open_table(REJECTIONS_TABLE)?;
            let _ = write_txn.open_table(REQUEST_IDS_TABLE)?;
            let _ = write_txn.open_table(COUPONS_TABLE)?;
            let _ = write_txn.open_table(COUPON_CODES_TABLE)?;
            let _ = write_txn.open_table(LOYALTY_PROGRAMS_TABLE)?;
            let _ = write_txn.open_table(LOYALTY_LEDGER_TABLE)?;
            let _ = write_txn.open_table(TENANT_SETTINGS_TABLE)?;
            let _ = write_txn.open_table(COUNTERS_TABLE)?;
            let _ = write_txn.open_table(ACTIVE_QUEUE_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Orders ==========

    /// Store an order and its listing indexes (within transaction)
    pub fn store_order_txn(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        let value = encode(order)?;
        {
            let mut table = txn.open_table(ORDERS_TABLE)?;
            table.insert(order.id, value.as_slice())?;
        }
        {
            let mut table = txn.open_table(TENANT_ORDERS_TABLE)?;
            table.insert((order.tenant_id, order.id), ())?;
        }
        if let Some(customer_id) = order.customer_id {
            let mut table = txn.open_table(CUSTOMER_ORDERS_TABLE)?;
            table.insert((order.tenant_id, customer_id, order.id), ())?;
        }
        Ok(())
    }

    /// Whether any tenant already owns this id (within transaction)
    pub fn order_exists_txn(&self, txn: &WriteTransaction, order_id: i64) -> StorageResult<bool> {
        let table = txn.open_table(ORDERS_TABLE)?;
        Ok(table.get(order_id)?.is_some())
    }

    /// Get an order scoped to a tenant (within transaction)
    ///
    /// An order of another tenant is reported as absent.
    pub fn get_order_txn(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
        order_id: i64,
    ) -> StorageResult<Option<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;
        let order: Option<Order> = match table.get(order_id)? {
            Some(value) => Some(decode(value.value())?),
            None => None,
        };
        Ok(order.filter(|o| o.tenant_id == tenant_id))
    }

    /// Get an order scoped to a tenant
    pub fn get_order(&self, tenant_id: i64, order_id: i64) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        let order: Option<Order> = match table.get(order_id)? {
            Some(value) => Some(decode(value.value())?),
            None => None,
        };
        Ok(order.filter(|o| o.tenant_id == tenant_id))
    }

    /// List a tenant's orders, newest first, optionally filtered by status
    ///
    /// Returns the requested page and the number of matching orders.
    pub fn list_orders(
        &self,
        tenant_id: i64,
        status: Option<OrderStatus>,
        offset: usize,
        limit: usize,
    ) -> StorageResult<(Vec<Order>, u64)> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(TENANT_ORDERS_TABLE)?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;

        let mut page = Vec::new();
        let mut total: u64 = 0;
        for result in index.range((tenant_id, i64::MIN)..=(tenant_id, i64::MAX))?.rev() {
            let (key, _) = result?;
            let (_, order_id) = key.value();
            let Some(value) = orders.get(order_id)? else {
                continue;
            };
            let order: Order = decode(value.value())?;
            if status.is_some_and(|s| s != order.status) {
                continue;
            }
            if total as usize >= offset && page.len() < limit {
                page.push(order);
            }
            total += 1;
        }

        Ok((page, total))
    }

    /// Whether a customer already has an order with the tenant (within transaction)
    pub fn customer_has_orders_txn(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
        customer_id: i64,
    ) -> StorageResult<bool> {
        let table = txn.open_table(CUSTOMER_ORDERS_TABLE)?;
        let mut range = table.range(
            (tenant_id, customer_id, i64::MIN)..=(tenant_id, customer_id, i64::MAX),
        )?;
        Ok(range.next().transpose()?.is_some())
    }

    // ========== Status History ==========

    /// Append a history row with the next sequence number (within transaction)
    pub fn append_history_txn(
        &self,
        txn: &WriteTransaction,
        order_id: i64,
        from: OrderStatus,
        to: OrderStatus,
        actor: &Actor,
        notes: Option<String>,
        timestamp: i64,
    ) -> StorageResult<OrderStatusHistory> {
        let mut table = txn.open_table(HISTORY_TABLE)?;
        let last_seq = table
            .range((order_id, 0u32)..=(order_id, u32::MAX))?
            .next_back()
            .transpose()?
            .map(|(key, _)| key.value().1)
            .unwrap_or(0);

        let row = OrderStatusHistory {
            order_id,
            seq: last_seq + 1,
            from,
            to,
            actor: actor.clone(),
            notes,
            timestamp,
        };
        let value = encode(&row)?;
        table.insert((order_id, row.seq), value.as_slice())?;
        Ok(row)
    }

    /// Get the status history of an order in sequence order
    pub fn get_history(&self, order_id: i64) -> StorageResult<Vec<OrderStatusHistory>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(HISTORY_TABLE)?;

        let mut rows = Vec::new();
        for result in table.range((order_id, 0u32)..=(order_id, u32::MAX))? {
            let (_key, value) = result?;
            rows.push(decode(value.value())?);
        }
        Ok(rows)
    }

    // ========== Rejections ==========

    /// Store the rejection record (within transaction)
    pub fn store_rejection_txn(
        &self,
        txn: &WriteTransaction,
        rejection: &OrderRejection,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(REJECTIONS_TABLE)?;
        let value = encode(rejection)?;
        table.insert(rejection.order_id, value.as_slice())?;
        Ok(())
    }

    /// Get the rejection record of an order
    pub fn get_rejection(&self, order_id: i64) -> StorageResult<Option<OrderRejection>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REJECTIONS_TABLE)?;
        match table.get(order_id)? {
            Some(value) => Ok(Some(decode(value.value())?)),
            None => Ok(None),
        }
    }

    // ========== Create Idempotency ==========

    /// Order created for a client request id (within transaction)
    pub fn find_request_txn(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
        request_id: &str,
    ) -> StorageResult<Option<i64>> {
        let table = txn.open_table(REQUEST_IDS_TABLE)?;
        Ok(table.get((tenant_id, request_id))?.map(|g| g.value()))
    }

    /// Remember the order created for a client request id (within transaction)
    pub fn mark_request_txn(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
        request_id: &str,
        order_id: i64,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(REQUEST_IDS_TABLE)?;
        table.insert((tenant_id, request_id), order_id)?;
        Ok(())
    }

    // ========== Queue ==========

    /// Increment and return the tenant's queue counter (within transaction)
    pub fn next_queue_position_txn(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
    ) -> StorageResult<u64> {
        let mut table = txn.open_table(COUNTERS_TABLE)?;
        let current = table
            .get((tenant_id, QUEUE_COUNTER_KEY))?
            .map(|g| g.value())
            .unwrap_or(0);
        let next = current + 1;
        table.insert((tenant_id, QUEUE_COUNTER_KEY), next)?;
        Ok(next)
    }

    /// Put an order into the live queue (within transaction)
    pub fn enqueue_txn(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
        position: u64,
        order_id: i64,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(ACTIVE_QUEUE_TABLE)?;
        table.insert((tenant_id, position), order_id)?;
        Ok(())
    }

    /// Take a position out of the live queue (within transaction)
    pub fn dequeue_txn(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
        position: u64,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(ACTIVE_QUEUE_TABLE)?;
        table.remove((tenant_id, position))?;
        Ok(())
    }

    /// Orders in the live queue, position ascending
    pub fn get_queued_orders(&self, tenant_id: i64) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let queue = read_txn.open_table(ACTIVE_QUEUE_TABLE)?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;

        let mut result = Vec::new();
        for entry in queue.range((tenant_id, 0u64)..=(tenant_id, u64::MAX))? {
            let (_key, order_id) = entry?;
            if let Some(value) = orders.get(order_id.value())? {
                result.push(decode(value.value())?);
            }
        }
        Ok(result)
    }

    // ========== Coupons ==========

    /// Insert or replace a coupon (seeding; the coupon subsystem owns CRUD)
    pub fn store_coupon(&self, coupon: &Coupon) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        self.store_coupon_txn(&txn, coupon)?;
        {
            let mut codes = txn.open_table(COUPON_CODES_TABLE)?;
            let code = normalize_coupon_code(&coupon.code);
            codes.insert((coupon.tenant_id, code.as_str()), coupon.id)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Write a coupon row (within transaction)
    pub fn store_coupon_txn(&self, txn: &WriteTransaction, coupon: &Coupon) -> StorageResult<()> {
        let mut table = txn.open_table(COUPONS_TABLE)?;
        let value = encode(coupon)?;
        table.insert(coupon.id, value.as_slice())?;
        Ok(())
    }

    /// Get a coupon by id (within transaction)
    pub fn get_coupon_txn(
        &self,
        txn: &WriteTransaction,
        coupon_id: i64,
    ) -> StorageResult<Option<Coupon>> {
        let table = txn.open_table(COUPONS_TABLE)?;
        match table.get(coupon_id)? {
            Some(value) => Ok(Some(decode(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get a tenant's coupon by code (within transaction)
    pub fn get_coupon_by_code_txn(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
        code: &str,
    ) -> StorageResult<Option<Coupon>> {
        let coupon_id = {
            let codes = txn.open_table(COUPON_CODES_TABLE)?;
            let code = normalize_coupon_code(code);
            codes.get((tenant_id, code.as_str()))?.map(|g| g.value())
        };
        match coupon_id {
            Some(id) => Ok(self
                .get_coupon_txn(txn, id)?
                .filter(|c| c.tenant_id == tenant_id)),
            None => Ok(None),
        }
    }

    /// Get a coupon by id
    pub fn get_coupon(&self, coupon_id: i64) -> StorageResult<Option<Coupon>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COUPONS_TABLE)?;
        match table.get(coupon_id)? {
            Some(value) => Ok(Some(decode(value.value())?)),
            None => Ok(None),
        }
    }

    // ========== Loyalty ==========

    /// Insert or replace a tenant's loyalty program (seeding)
    pub fn store_loyalty_program(&self, program: &LoyaltyProgram) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LOYALTY_PROGRAMS_TABLE)?;
            let value = encode(program)?;
            table.insert(program.tenant_id, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get a tenant's loyalty program (within transaction)
    pub fn get_loyalty_program_txn(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
    ) -> StorageResult<Option<LoyaltyProgram>> {
        let table = txn.open_table(LOYALTY_PROGRAMS_TABLE)?;
        match table.get(tenant_id)? {
            Some(value) => Ok(Some(decode(value.value())?)),
            None => Ok(None),
        }
    }

    /// Append a ledger entry (within transaction)
    pub fn append_loyalty_entry_txn(
        &self,
        txn: &WriteTransaction,
        entry: &LoyaltyEntry,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(LOYALTY_LEDGER_TABLE)?;
        let value = encode(entry)?;
        table.insert(
            (entry.tenant_id, entry.customer_id, entry.id),
            value.as_slice(),
        )?;
        Ok(())
    }

    /// Append a ledger entry in its own transaction (for testing)
    #[cfg(test)]
    pub fn append_loyalty_entry(&self, entry: &LoyaltyEntry) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        self.append_loyalty_entry_txn(&txn, entry)?;
        txn.commit()?;
        Ok(())
    }

    /// All ledger entries of a customer
    pub fn get_loyalty_entries(
        &self,
        tenant_id: i64,
        customer_id: i64,
    ) -> StorageResult<Vec<LoyaltyEntry>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOYALTY_LEDGER_TABLE)?;

        let mut entries = Vec::new();
        for result in
            table.range((tenant_id, customer_id, i64::MIN)..=(tenant_id, customer_id, i64::MAX))?
        {
            let (_key, value) = result?;
            entries.push(decode(value.value())?);
        }
        Ok(entries)
    }

    /// Number of ledger entries across all tenants (for testing)
    #[cfg(test)]
    pub fn loyalty_entry_count(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOYALTY_LEDGER_TABLE)?;
        Ok(table.len()?)
    }

    // ========== Tenant Settings ==========

    /// Insert or replace a tenant's settings (seeding)
    pub fn store_tenant_settings(&self, settings: &TenantSettings) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(TENANT_SETTINGS_TABLE)?;
            let value = encode(settings)?;
            table.insert(settings.tenant_id, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get a tenant's settings (within transaction)
    pub fn get_tenant_settings_txn(
        &self,
        txn: &WriteTransaction,
        tenant_id: i64,
    ) -> StorageResult<Option<TenantSettings>> {
        let table = txn.open_table(TENANT_SETTINGS_TABLE)?;
        match table.get(tenant_id)? {
            Some(value) => Ok(Some(decode(value.value())?)),
            None => Ok(None),
        }
    }
}

/// Coupon codes are matched case-insensitively, ignoring surrounding whitespace
pub fn normalize_coupon_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{DiscountType, LoyaltyReason};
    use shared::order::{OrderKind, PaymentStatus};

    fn order(id: i64, tenant_id: i64, customer_id: Option<i64>) -> Order {
        Order {
            id,
            tenant_id,
            customer_id,
            kind: OrderKind::Pickup,
            delivery_address: None,
            table_id: None,
            status: OrderStatus::Pending,
            items: vec![],
            subtotal: Decimal::ZERO,
            delivery_fee: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            total: Decimal::ZERO,
            coupon_code: None,
            estimated_preparation_minutes: None,
            estimated_delivery_time: None,
            queue_position: None,
            payment_status: PaymentStatus::Unpaid,
            payment_reference: None,
            notes: None,
            client_request_id: None,
            created_by: Actor::new(1, "Tester"),
            created_at: id,
            updated_at: id,
            version: 1,
        }
    }

    #[test]
    fn test_open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.redb");
        let storage = OrderStorage::open(&path).unwrap();
        assert!(path.exists());
        assert!(storage.get_order(1, 1).unwrap().is_none());
    }

    #[test]
    fn test_store_and_get_order_is_tenant_scoped() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        storage.store_order_txn(&txn, &order(10, 1, Some(5))).unwrap();
        txn.commit().unwrap();

        assert!(storage.get_order(1, 10).unwrap().is_some());
        assert!(storage.get_order(2, 10).unwrap().is_none());
    }

    #[test]
    fn test_list_orders_newest_first_with_paging() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        for id in 1..=5 {
            storage.store_order_txn(&txn, &order(id, 1, None)).unwrap();
        }
        storage.store_order_txn(&txn, &order(6, 2, None)).unwrap();
        txn.commit().unwrap();

        let (page, total) = storage.list_orders(1, None, 0, 2).unwrap();
        assert_eq!(total, 5);
        assert_eq!(page.iter().map(|o| o.id).collect::<Vec<_>>(), vec![5, 4]);

        let (page, _) = storage.list_orders(1, None, 4, 2).unwrap();
        assert_eq!(page.iter().map(|o| o.id).collect::<Vec<_>>(), vec![1]);

        let (page, total) = storage
            .list_orders(1, Some(OrderStatus::Delivered), 0, 10)
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn test_customer_has_orders() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        assert!(!storage.customer_has_orders_txn(&txn, 1, 5).unwrap());
        storage.store_order_txn(&txn, &order(10, 1, Some(5))).unwrap();
        assert!(storage.customer_has_orders_txn(&txn, 1, 5).unwrap());
        assert!(!storage.customer_has_orders_txn(&txn, 2, 5).unwrap());
        assert!(!storage.customer_has_orders_txn(&txn, 1, 6).unwrap());
    }

    #[test]
    fn test_history_sequence_is_per_order() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let actor = Actor::new(1, "Tester");
        let txn = storage.begin_write().unwrap();
        let first = storage
            .append_history_txn(&txn, 10, OrderStatus::Pending, OrderStatus::Confirmed, &actor, None, 1)
            .unwrap();
        let second = storage
            .append_history_txn(&txn, 10, OrderStatus::Confirmed, OrderStatus::Preparing, &actor, None, 2)
            .unwrap();
        let other = storage
            .append_history_txn(&txn, 11, OrderStatus::Pending, OrderStatus::Rejected, &actor, None, 3)
            .unwrap();
        txn.commit().unwrap();

        assert_eq!(first.seq, 1);
        assert_eq!(second.seq, 2);
        assert_eq!(other.seq, 1);

        let history = storage.get_history(10).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].to, OrderStatus::Preparing);
    }

    #[test]
    fn test_aborted_transaction_leaves_no_trace() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        storage.store_order_txn(&txn, &order(10, 1, None)).unwrap();
        txn.abort().unwrap();

        assert!(storage.get_order(1, 10).unwrap().is_none());
    }

    #[test]
    fn test_queue_counter_is_per_tenant() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let txn = storage.begin_write().unwrap();
        assert_eq!(storage.next_queue_position_txn(&txn, 1).unwrap(), 1);
        assert_eq!(storage.next_queue_position_txn(&txn, 1).unwrap(), 2);
        assert_eq!(storage.next_queue_position_txn(&txn, 2).unwrap(), 1);
        txn.commit().unwrap();
    }

    #[test]
    fn test_coupon_code_lookup_is_normalized_and_scoped() {
        let storage = OrderStorage::open_in_memory().unwrap();
        storage
            .store_coupon(&Coupon {
                id: 7,
                tenant_id: 1,
                code: "Summer10".to_string(),
                discount_type: DiscountType::Percentage,
                value: Decimal::from(10),
                min_order_value: None,
                max_discount_value: None,
                usage_limit: None,
                usage_count: 0,
                valid_from: None,
                valid_until: None,
                is_active: true,
                first_order_only: false,
            })
            .unwrap();

        let txn = storage.begin_write().unwrap();
        assert!(storage.get_coupon_by_code_txn(&txn, 1, " summer10 ").unwrap().is_some());
        assert!(storage.get_coupon_by_code_txn(&txn, 2, "SUMMER10").unwrap().is_none());
    }

    #[test]
    fn test_loyalty_entries_by_customer() {
        let storage = OrderStorage::open_in_memory().unwrap();
        for (id, customer) in [(1, 5), (2, 5), (3, 6)] {
            storage
                .append_loyalty_entry(&LoyaltyEntry {
                    id,
                    tenant_id: 1,
                    customer_id: customer,
                    points: 10,
                    reason: LoyaltyReason::OrderCompleted,
                    order_id: None,
                    expires_at: None,
                    created_at: 0,
                })
                .unwrap();
        }
        assert_eq!(storage.get_loyalty_entries(1, 5).unwrap().len(), 2);
        assert_eq!(storage.loyalty_entry_count().unwrap(), 3);
    }
}
