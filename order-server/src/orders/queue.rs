//! Queue Position Assigner (TableService only)
//!
//! Positions come from a per-tenant counter and are never reused or
//! compacted. A position leaves the live queue index when its order reaches
//! a terminal status; the "current queue" is read from that index.

use super::storage::{OrderStorage, StorageResult};
use redb::WriteTransaction;
use shared::order::{Order, OrderKind, QueueEntry};

/// Assign the next position to a new TableService order
pub fn assign(storage: &OrderStorage, txn: &WriteTransaction, order: &mut Order) -> StorageResult<()> {
    if order.kind != OrderKind::TableService {
        return Ok(());
    }
    let position = storage.next_queue_position_txn(txn, order.tenant_id)?;
    storage.enqueue_txn(txn, order.tenant_id, position, order.id)?;
    order.queue_position = Some(position);
    Ok(())
}

/// Take a terminal order out of the live queue; its number stays on the order
pub fn release(storage: &OrderStorage, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
    if order.kind != OrderKind::TableService || !order.status.is_terminal() {
        return Ok(());
    }
    if let Some(position) = order.queue_position {
        storage.dequeue_txn(txn, order.tenant_id, position)?;
        tracing::debug!(order_id = order.id, tenant_id = order.tenant_id, position, "Queue position released");
    }
    Ok(())
}

/// Live TableService orders, position ascending
pub fn current_queue(storage: &OrderStorage, tenant_id: i64) -> StorageResult<Vec<QueueEntry>> {
    let orders = storage.get_queued_orders(tenant_id)?;
    Ok(orders
        .into_iter()
        .filter(Order::holds_queue_position)
        .filter_map(|o| {
            Some(QueueEntry {
                order_id: o.id,
                queue_position: o.queue_position?,
                table_id: o.table_id,
                status: o.status,
                created_at: o.created_at,
            })
        })
        .collect())
}
