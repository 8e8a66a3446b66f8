//! OrdersManager - order operations over one redb transaction each
//!
//! This module handles:
//! - Create / validate (cart → priced snapshot → Pending order)
//! - Editable field updates
//! - Accept / reject / generic status changes through the transition table
//! - Transition side effects (history, loyalty, queue release, refund flag)
//! - Reads (detail, paged list, live queue, loyalty balance)
//!
//! # Operation Flow
//!
//! ```text
//! create_order(tenant, actor, req)
//!     ├─ 1. Begin write transaction
//!     ├─ 2. Idempotency check (client_request_id)
//!     ├─ 3. Validate + price (catalog, coupon store, tenant settings)
//!     ├─ 4. Consume coupon use (increment-with-limit)
//!     ├─ 5. Build aggregate, assign queue position
//!     ├─ 6. Persist order + indexes
//!     └─ 7. Commit (any error aborts everything)
//! ```

mod error;
pub use error::*;

use super::aggregate;
use super::coupons::{CouponStore, RedbCouponStore};
use super::error::OrderError;
use super::loyalty::{self, LoyaltyLedger, RedbLoyaltyLedger};
use super::queue;
use super::storage::OrderStorage;
use super::transitions;
use super::validation::{self, ValidationContext};
use crate::catalog::CatalogReader;
use crate::utils::validation::{MAX_PER_PAGE, MAX_REQUEST_ID_LEN};
use redb::WriteTransaction;
use rust_decimal::Decimal;
use shared::models::LoyaltyBalance;
use shared::order::{
    AcceptOrderRequest, Actor, ChangeStatusRequest, CreateOrderRequest, Order, OrderDetail,
    OrderKind, OrderListQuery, OrderPage, OrderQuote, OrderRejection, OrderStatus,
    OrderStatusHistory, PaymentStatus, QueueEntry, RecordPaymentRequest, RejectOrderRequest,
    UpdateOrderRequest,
};
use shared::util::{MINUTE_MS, now_millis, snowflake_id};
use std::path::Path;
use std::sync::Arc;

/// Reason recorded when an order is rejected through the generic status endpoint
const DEFAULT_REJECTION_REASON: &str = "Rejected";

/// Result of a create call
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub order: Order,
    /// false when an earlier create with the same client_request_id is replayed
    pub created: bool,
}

/// OrdersManager for order lifecycle operations
pub struct OrdersManager {
    storage: OrderStorage,
    catalog: Arc<dyn CatalogReader>,
    coupons: Arc<dyn CouponStore>,
    loyalty: Arc<dyn LoyaltyLedger>,
    /// Fallback when neither the request nor the tenant configures a fee
    default_delivery_fee: Decimal,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("storage", &"<OrderStorage>")
            .field("catalog", &"<CatalogReader>")
            .field("default_delivery_fee", &self.default_delivery_fee)
            .finish()
    }
}

impl OrdersManager {
    /// Create a manager over existing storage with redb-backed coupon and loyalty adapters
    pub fn new(
        storage: OrderStorage,
        catalog: Arc<dyn CatalogReader>,
        default_delivery_fee: Decimal,
    ) -> Self {
        Self {
            coupons: Arc::new(RedbCouponStore::new(storage.clone())),
            loyalty: Arc::new(RedbLoyaltyLedger::new(storage.clone())),
            storage,
            catalog,
            default_delivery_fee,
        }
    }

    /// Open the database at the given path
    pub fn open(
        db_path: impl AsRef<Path>,
        catalog: Arc<dyn CatalogReader>,
        default_delivery_fee: Decimal,
    ) -> ManagerResult<Self> {
        let storage = OrderStorage::open(db_path)?;
        Ok(Self::new(storage, catalog, default_delivery_fee))
    }

    /// Replace the coupon store adapter
    pub fn with_coupon_store(mut self, coupons: Arc<dyn CouponStore>) -> Self {
        self.coupons = coupons;
        self
    }

    /// Replace the loyalty ledger adapter
    pub fn with_loyalty_ledger(mut self, loyalty: Arc<dyn LoyaltyLedger>) -> Self {
        self.loyalty = loyalty;
        self
    }

    pub fn storage(&self) -> &OrderStorage {
        &self.storage
    }

    /// Run `f` in one write transaction: commit on Ok, abort on Err
    fn in_transaction<T>(
        &self,
        f: impl FnOnce(&WriteTransaction) -> ManagerResult<T>,
    ) -> ManagerResult<T> {
        let txn = self.storage.begin_write()?;
        match f(&txn) {
            Ok(value) => {
                txn.commit()?;
                Ok(value)
            }
            Err(e) => {
                if let Err(abort_err) = txn.abort() {
                    tracing::warn!(error = %abort_err, "Failed to abort transaction");
                }
                Err(e)
            }
        }
    }

    fn validation_context<'a>(
        &'a self,
        txn: &'a WriteTransaction,
        tenant_id: i64,
        now: i64,
    ) -> ValidationContext<'a> {
        ValidationContext {
            txn,
            storage: &self.storage,
            catalog: self.catalog.as_ref(),
            coupons: self.coupons.as_ref(),
            tenant_id,
            now,
            default_delivery_fee: self.default_delivery_fee,
        }
    }

    fn load_order(&self, txn: &WriteTransaction, tenant_id: i64, order_id: i64) -> ManagerResult<Order> {
        self.storage
            .get_order_txn(txn, tenant_id, order_id)?
            .ok_or_else(|| OrderError::OrderNotFound(order_id).into())
    }

    /// Persist after checking invariants
    fn save_order(&self, txn: &WriteTransaction, order: &Order) -> ManagerResult<()> {
        aggregate::check_invariants(order).map_err(ManagerError::Internal)?;
        self.storage.store_order_txn(txn, order)?;
        Ok(())
    }

    // ========== Create ==========

    /// Validate and price a create request without persisting anything
    ///
    /// Running it twice on unchanged state yields the same quote.
    pub fn validate_order(&self, tenant_id: i64, req: &CreateOrderRequest) -> ManagerResult<OrderQuote> {
        let txn = self.storage.begin_write()?;
        let result = validation::validate_create(
            &self.validation_context(&txn, tenant_id, now_millis()),
            req,
        );
        if let Err(e) = txn.abort() {
            tracing::warn!(error = %e, "Failed to abort validation transaction");
        }
        let validated = result?;
        Ok(OrderQuote {
            items: validated.items,
            subtotal: validated.pricing.subtotal,
            delivery_fee: validated.pricing.delivery_fee,
            discount_amount: validated.pricing.discount_amount,
            total: validated.pricing.total,
            coupon_code: validated.coupon.map(|c| c.code),
        })
    }

    /// Create a Pending order from a cart
    pub fn create_order(
        &self,
        tenant_id: i64,
        actor: Actor,
        req: CreateOrderRequest,
    ) -> ManagerResult<CreateOutcome> {
        let now = now_millis();
        let outcome = self.in_transaction(|txn| {
            if let Some(request_id) = req.client_request_id.as_deref() {
                validation::check_text("client_request_id", Some(request_id), MAX_REQUEST_ID_LEN)?;
                if let Some(order_id) = self.storage.find_request_txn(txn, tenant_id, request_id)? {
                    let order = self.load_order(txn, tenant_id, order_id)?;
                    return Ok(CreateOutcome {
                        order,
                        created: false,
                    });
                }
            }

            let validated =
                validation::validate_create(&self.validation_context(txn, tenant_id, now), &req)?;

            if let Some(coupon) = &validated.coupon
                && !self.coupons.increment_usage(txn, coupon.id)?
            {
                return Err(OrderError::CouponUsageLimitReached(coupon.code.clone()).into());
            }

            let id = self.next_order_id(txn)?;
            let mut order = aggregate::build_order(id, tenant_id, req.clone(), validated, actor, now);
            queue::assign(&self.storage, txn, &mut order)?;
            self.save_order(txn, &order)?;
            if let Some(request_id) = order.client_request_id.as_deref() {
                self.storage
                    .mark_request_txn(txn, tenant_id, request_id, order.id)?;
            }

            Ok(CreateOutcome {
                order,
                created: true,
            })
        })?;

        if outcome.created {
            tracing::info!(
                order_id = outcome.order.id,
                tenant_id,
                kind = ?outcome.order.kind,
                total = %outcome.order.total,
                queue_position = ?outcome.order.queue_position,
                "Order created"
            );
        } else {
            tracing::debug!(order_id = outcome.order.id, tenant_id, "Duplicate create request replayed");
        }
        Ok(outcome)
    }

    /// Snowflake id not yet used by any order
    fn next_order_id(&self, txn: &WriteTransaction) -> ManagerResult<i64> {
        loop {
            let id = snowflake_id();
            if !self.storage.order_exists_txn(txn, id)? {
                return Ok(id);
            }
        }
    }

    // ========== Update ==========

    /// Edit notes, delivery address or table of an editable order
    pub fn update_order(
        &self,
        tenant_id: i64,
        order_id: i64,
        req: UpdateOrderRequest,
    ) -> ManagerResult<Order> {
        let now = now_millis();
        self.in_transaction(|txn| {
            let mut order = self.load_order(txn, tenant_id, order_id)?;
            validation::validate_update(self.catalog.as_ref(), &order, &req)?;
            if aggregate::apply_update(&mut order, req) {
                aggregate::touch(&mut order, now);
                self.save_order(txn, &order)?;
                tracing::info!(order_id, tenant_id, version = order.version, "Order updated");
            }
            Ok(order)
        })
    }

    // ========== Status ==========

    /// Pending → Confirmed with a preparation estimate
    pub fn accept_order(
        &self,
        tenant_id: i64,
        order_id: i64,
        actor: Actor,
        req: AcceptOrderRequest,
    ) -> ManagerResult<Order> {
        let now = now_millis();
        self.in_transaction(|txn| {
            let mut order = self.load_order(txn, tenant_id, order_id)?;
            validation::validate_accept(&order, &req)?;

            let minutes = req.estimated_preparation_minutes;
            let lead_minutes = match order.kind {
                OrderKind::Delivery => self
                    .storage
                    .get_tenant_settings_txn(txn, tenant_id)?
                    .map(|s| s.delivery_lead_minutes)
                    .unwrap_or(0),
                OrderKind::Pickup | OrderKind::TableService => 0,
            };
            order.estimated_preparation_minutes = Some(minutes);
            order.estimated_delivery_time =
                Some(now + (i64::from(minutes) + i64::from(lead_minutes)) * MINUTE_MS);

            self.apply_transition(txn, &mut order, OrderStatus::Confirmed, &actor, req.notes, None, now)?;
            self.save_order(txn, &order)?;
            Ok(order)
        })
    }

    /// Pending → Rejected with a rejection record
    pub fn reject_order(
        &self,
        tenant_id: i64,
        order_id: i64,
        actor: Actor,
        req: RejectOrderRequest,
    ) -> ManagerResult<Order> {
        let now = now_millis();
        self.in_transaction(|txn| {
            let mut order = self.load_order(txn, tenant_id, order_id)?;
            let reason = validation::validate_reject(&order, &req)?;
            self.apply_transition(
                txn,
                &mut order,
                OrderStatus::Rejected,
                &actor,
                req.notes,
                Some(reason),
                now,
            )?;
            self.save_order(txn, &order)?;
            Ok(order)
        })
    }

    /// Any legal transition, with optional compare-and-swap on the current status
    pub fn change_status(
        &self,
        tenant_id: i64,
        order_id: i64,
        actor: Actor,
        req: ChangeStatusRequest,
    ) -> ManagerResult<Order> {
        let now = now_millis();
        self.in_transaction(|txn| {
            let mut order = self.load_order(txn, tenant_id, order_id)?;
            validation::validate_status_change(&order, &req)?;
            self.apply_transition(txn, &mut order, req.status, &actor, req.notes, None, now)?;
            self.save_order(txn, &order)?;
            Ok(order)
        })
    }

    /// Apply one transition and its side effects inside `txn`
    ///
    /// The caller persists the order afterwards; any error aborts the whole
    /// transaction, so history, loyalty, queue and status move together.
    #[allow(clippy::too_many_arguments)]
    fn apply_transition(
        &self,
        txn: &WriteTransaction,
        order: &mut Order,
        to: OrderStatus,
        actor: &Actor,
        notes: Option<String>,
        rejection_reason: Option<String>,
        now: i64,
    ) -> ManagerResult<OrderStatusHistory> {
        let from = order.status;
        transitions::check(from, to)?;

        let history =
            self.storage
                .append_history_txn(txn, order.id, from, to, actor, notes.clone(), now)?;
        order.status = to;
        aggregate::touch(order, now);

        if to == OrderStatus::Delivered {
            self.accrue_loyalty(txn, order, now)?;
        }
        if to.is_terminal() {
            queue::release(&self.storage, txn, order)?;
        }
        if matches!(to, OrderStatus::Cancelled | OrderStatus::Rejected)
            && order.payment_status == PaymentStatus::Paid
        {
            order.payment_status = PaymentStatus::RefundPending;
            tracing::info!(order_id = order.id, "Paid order closed, refund pending");
        }
        if to == OrderStatus::Rejected {
            let rejection = OrderRejection {
                order_id: order.id,
                reason: rejection_reason.unwrap_or_else(|| DEFAULT_REJECTION_REASON.to_string()),
                notes,
                actor: actor.clone(),
                timestamp: now,
            };
            self.storage.store_rejection_txn(txn, &rejection)?;
        }

        tracing::info!(
            order_id = order.id,
            tenant_id = order.tenant_id,
            from = %from,
            to = %to,
            seq = history.seq,
            "Order status changed"
        );
        Ok(history)
    }

    fn accrue_loyalty(&self, txn: &WriteTransaction, order: &Order, now: i64) -> ManagerResult<()> {
        if order.customer_id.is_none() {
            return Ok(());
        }
        let Some(program) = self.loyalty.program(txn, order.tenant_id)? else {
            return Ok(());
        };
        if let Some(entry) = loyalty::accrual_entry(&program, order, now) {
            self.loyalty.accrue(txn, &entry)?;
        }
        Ok(())
    }

    // ========== Payment ==========

    /// Record the payment state reported by the payment subsystem
    pub fn record_payment(
        &self,
        tenant_id: i64,
        order_id: i64,
        req: RecordPaymentRequest,
    ) -> ManagerResult<Order> {
        let now = now_millis();
        self.in_transaction(|txn| {
            validation::check_text("reference", req.reference.as_deref(), MAX_REQUEST_ID_LEN)?;
            let mut order = self.load_order(txn, tenant_id, order_id)?;
            let closed = matches!(order.status, OrderStatus::Cancelled | OrderStatus::Rejected);
            order.payment_status = match req.status {
                PaymentStatus::Paid if closed => PaymentStatus::RefundPending,
                status => status,
            };
            if req.reference.is_some() {
                order.payment_reference = req.reference;
            }
            aggregate::touch(&mut order, now);
            self.save_order(txn, &order)?;
            tracing::info!(order_id, tenant_id, payment_status = ?order.payment_status, "Payment state recorded");
            Ok(order)
        })
    }

    // ========== Reads ==========

    /// Order with its history and rejection
    pub fn get_order(&self, tenant_id: i64, order_id: i64) -> ManagerResult<OrderDetail> {
        let order = self
            .storage
            .get_order(tenant_id, order_id)?
            .ok_or(OrderError::OrderNotFound(order_id))?;
        self.detail(order)
    }

    fn detail(&self, order: Order) -> ManagerResult<OrderDetail> {
        let history = self.storage.get_history(order.id)?;
        let rejection = self.storage.get_rejection(order.id)?;
        Ok(OrderDetail {
            order,
            history,
            rejection,
        })
    }

    /// Tenant's orders, newest first
    pub fn list_orders(&self, tenant_id: i64, query: &OrderListQuery) -> ManagerResult<OrderPage> {
        let page = query.page.max(1);
        let per_page = query.per_page.clamp(1, MAX_PER_PAGE);
        let offset = (page as usize - 1) * per_page as usize;

        let (orders, total) =
            self.storage
                .list_orders(tenant_id, query.status, offset, per_page as usize)?;
        let items = orders
            .into_iter()
            .map(|o| self.detail(o))
            .collect::<ManagerResult<Vec<_>>>()?;

        Ok(OrderPage {
            items,
            total,
            page,
            per_page,
        })
    }

    /// Live TableService queue, position ascending
    pub fn current_queue(&self, tenant_id: i64) -> ManagerResult<Vec<QueueEntry>> {
        Ok(queue::current_queue(&self.storage, tenant_id)?)
    }

    pub fn loyalty_balance(&self, tenant_id: i64, customer_id: i64) -> ManagerResult<LoyaltyBalance> {
        let points = self.loyalty.balance(tenant_id, customer_id, now_millis())?;
        Ok(LoyaltyBalance {
            customer_id,
            points,
        })
    }
}

#[cfg(test)]
mod tests;
