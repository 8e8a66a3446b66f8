//! Order aggregate construction and mutation
//!
//! Builds the persisted [`Order`] from a validated request and applies edits
//! of the editable fields. Status changes never happen here.

use super::validation::ValidatedOrder;
use rust_decimal::Decimal;
use shared::order::{Actor, CreateOrderRequest, Order, OrderKind, OrderStatus, UpdateOrderRequest};

/// Fresh Pending order (version 1, no queue position yet)
pub fn build_order(
    id: i64,
    tenant_id: i64,
    req: CreateOrderRequest,
    validated: ValidatedOrder,
    actor: Actor,
    now: i64,
) -> Order {
    let ValidatedOrder {
        items,
        coupon,
        pricing,
    } = validated;

    Order {
        id,
        tenant_id,
        customer_id: req.customer_id,
        kind: req.kind,
        delivery_address: req.delivery_address,
        table_id: req.table_id,
        status: OrderStatus::Pending,
        items,
        subtotal: pricing.subtotal,
        delivery_fee: pricing.delivery_fee,
        discount_amount: pricing.discount_amount,
        total: pricing.total,
        coupon_code: coupon.map(|c| c.code),
        estimated_preparation_minutes: None,
        estimated_delivery_time: None,
        queue_position: None,
        payment_status: Default::default(),
        payment_reference: None,
        notes: req.notes,
        client_request_id: req.client_request_id,
        created_by: actor,
        created_at: now,
        updated_at: now,
        version: 1,
    }
}

/// Apply the editable fields of a validated update
///
/// Returns whether anything changed.
pub fn apply_update(order: &mut Order, req: UpdateOrderRequest) -> bool {
    let mut changed = false;
    if let Some(notes) = req.notes {
        let notes = Some(notes).filter(|n| !n.trim().is_empty());
        changed |= order.notes != notes;
        order.notes = notes;
    }
    if let Some(address) = req.delivery_address {
        changed |= order.delivery_address.as_ref() != Some(&address);
        order.delivery_address = Some(address);
    }
    if let Some(table_id) = req.table_id {
        changed |= order.table_id != Some(table_id);
        order.table_id = Some(table_id);
    }
    changed
}

/// Bump version and timestamp after a committed mutation
pub fn touch(order: &mut Order, now: i64) {
    order.updated_at = now;
    order.version += 1;
}

/// Structural invariants every persisted order satisfies
pub fn check_invariants(order: &Order) -> Result<(), String> {
    if order.items.is_empty() {
        return Err(format!("order {} has no items", order.id));
    }
    let amounts = [
        order.subtotal,
        order.delivery_fee,
        order.discount_amount,
        order.total,
    ];
    if amounts.iter().any(|a| *a < Decimal::ZERO) {
        return Err(format!("order {} has a negative amount", order.id));
    }
    if order.total != order.subtotal + order.delivery_fee - order.discount_amount {
        return Err(format!("order {} totals do not add up", order.id));
    }
    if order.discount_amount > order.subtotal {
        return Err(format!("order {} discount exceeds its amount", order.id));
    }
    let kind_ok = match order.kind {
        OrderKind::Delivery => order.delivery_address.is_some() && order.table_id.is_none(),
        OrderKind::Pickup => order.delivery_address.is_none() && order.table_id.is_none(),
        OrderKind::TableService => order.delivery_address.is_none() && order.table_id.is_some(),
    };
    if !kind_ok {
        return Err(format!(
            "order {} fields do not match kind {:?}",
            order.id, order.kind
        ));
    }
    if order.queue_position.is_some() && order.kind != OrderKind::TableService {
        return Err(format!("order {} holds a queue position", order.id));
    }
    Ok(())
}
