//! Order Validator
//!
//! One operation per request type, all scoped to the requesting tenant.
//! Validators only read (through the operation's write transaction, so they
//! see the state the commit will be based on) and report the first failure
//! as a typed [`OrderError`]. Storage, catalog and coupon store failures
//! propagate as infrastructure errors.

use super::coupons::CouponStore;
use super::error::OrderError;
use super::manager::ManagerResult;
use super::storage::OrderStorage;
use super::transitions;
use crate::catalog::CatalogReader;
use crate::pricing::{
    DiscountTerms, PriceBreakdown, PricingInput, PricingLine, PricingModifier, calculate_order,
    is_money, modifier_subtotal, order_subtotal,
};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_COUPON_CODE_LEN, MAX_NOTE_LEN, MAX_PREPARATION_MINUTES, MAX_QUANTITY,
    MAX_REJECTION_REASON_LEN, MAX_REQUEST_ID_LEN, MAX_SHORT_TEXT_LEN, MIN_PREPARATION_MINUTES,
    MIN_QUANTITY, MIN_REJECTION_REASON_LEN, char_len, exceeds,
};
use redb::WriteTransaction;
use rust_decimal::Decimal;
use shared::models::Coupon;
use shared::order::{
    AcceptOrderRequest, CartItemInput, ChangeStatusRequest, CreateOrderRequest, DeliveryAddress,
    Order, OrderItem, OrderItemModifier, OrderKind, OrderStatus, RejectOrderRequest,
    UpdateOrderRequest,
};

/// Read access shared by the validators of one operation
pub struct ValidationContext<'a> {
    pub txn: &'a WriteTransaction,
    pub storage: &'a OrderStorage,
    pub catalog: &'a dyn CatalogReader,
    pub coupons: &'a dyn CouponStore,
    pub tenant_id: i64,
    pub now: i64,
    /// Used when neither the request nor the tenant settings give a fee
    pub default_delivery_fee: Decimal,
}

/// Validated and priced create request
#[derive(Debug, Clone)]
pub struct ValidatedOrder {
    /// Snapshots with subtotals filled in
    pub items: Vec<OrderItem>,
    pub coupon: Option<Coupon>,
    pub pricing: PriceBreakdown,
}

// ========== Create ==========

/// Validate and price a create request
pub fn validate_create(
    ctx: &ValidationContext<'_>,
    req: &CreateOrderRequest,
) -> ManagerResult<ValidatedOrder> {
    if req.items.is_empty() {
        return Err(OrderError::EmptyOrder.into());
    }
    for item in &req.items {
        check_quantity(item.quantity)?;
        for modifier in &item.modifiers {
            check_quantity(modifier.quantity)?;
        }
        check_text("item.notes", item.notes.as_deref(), MAX_NOTE_LEN)?;
    }
    check_text("notes", req.notes.as_deref(), MAX_NOTE_LEN)?;
    check_text("coupon_code", req.coupon_code.as_deref(), MAX_COUPON_CODE_LEN)?;
    check_text(
        "client_request_id",
        req.client_request_id.as_deref(),
        MAX_REQUEST_ID_LEN,
    )?;

    let mut items = snapshot_items(ctx.catalog, ctx.tenant_id, &req.items)?;

    check_kind_fields(
        ctx.catalog,
        ctx.tenant_id,
        req.kind,
        req.table_id,
        req.delivery_address.as_ref(),
    )?;

    let delivery_fee = resolve_delivery_fee(ctx, req.kind, req.delivery_fee)?;

    let lines: Vec<PricingLine> = items.iter().map(pricing_line).collect();
    let coupon = match req.coupon_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => {
            let subtotal = order_subtotal(&lines);
            Some(validate_coupon(ctx, code, subtotal, req.customer_id)?)
        }
        _ => None,
    };

    let pricing = calculate_order(&PricingInput {
        lines,
        discount: coupon.as_ref().map(DiscountTerms::from),
        kind: req.kind,
        delivery_fee,
    });
    for (item, subtotal) in items.iter_mut().zip(&pricing.line_subtotals) {
        item.subtotal = *subtotal;
    }

    Ok(ValidatedOrder {
        items,
        coupon,
        pricing,
    })
}

/// Resolve cart lines against the catalog into price/name snapshots
///
/// Subtotals are left at zero; the pricing calculator fills them in.
fn snapshot_items(
    catalog: &dyn CatalogReader,
    tenant_id: i64,
    cart: &[CartItemInput],
) -> ManagerResult<Vec<OrderItem>> {
    let mut items = Vec::with_capacity(cart.len());
    for line in cart {
        let product = catalog
            .get_product(tenant_id, line.product_id)?
            .ok_or(OrderError::ProductNotFound(line.product_id))?;
        if !product.is_active {
            return Err(OrderError::ProductInactive(product.name).into());
        }

        let mut modifiers = Vec::with_capacity(line.modifiers.len());
        for selection in &line.modifiers {
            let modifier = catalog
                .get_active_modifier(tenant_id, selection.modifier_id)?
                .ok_or(OrderError::ModifierNotFound(selection.modifier_id))?;
            let priced = PricingModifier {
                unit_price: modifier.price,
                quantity: selection.quantity,
            };
            modifiers.push(OrderItemModifier {
                modifier_id: modifier.id,
                kind: modifier.kind,
                name: modifier.name,
                unit_price: modifier.price,
                quantity: selection.quantity,
                subtotal: modifier_subtotal(&priced),
            });
        }

        items.push(OrderItem {
            product_id: product.id,
            name: product.name,
            unit_price: product.price,
            quantity: line.quantity,
            notes: line.notes.clone(),
            modifiers,
            subtotal: Decimal::ZERO,
        });
    }
    Ok(items)
}

fn pricing_line(item: &OrderItem) -> PricingLine {
    PricingLine {
        unit_price: item.unit_price,
        quantity: item.quantity,
        modifiers: item
            .modifiers
            .iter()
            .map(|m| PricingModifier {
                unit_price: m.unit_price,
                quantity: m.quantity,
            })
            .collect(),
    }
}

/// Table / address presence must match the order kind
fn check_kind_fields(
    catalog: &dyn CatalogReader,
    tenant_id: i64,
    kind: OrderKind,
    table_id: Option<i64>,
    address: Option<&DeliveryAddress>,
) -> ManagerResult<()> {
    match kind {
        OrderKind::TableService => {
            let table_id = table_id.ok_or(OrderError::TableRequired)?;
            if address.is_some() {
                return Err(not_allowed("delivery_address", kind).into());
            }
            check_table(catalog, tenant_id, table_id)
        }
        OrderKind::Delivery => {
            if table_id.is_some() {
                return Err(not_allowed("table_id", kind).into());
            }
            let address = address.ok_or(OrderError::DeliveryAddressRequired)?;
            Ok(validate_address(address)?)
        }
        OrderKind::Pickup => {
            if table_id.is_some() {
                return Err(not_allowed("table_id", kind).into());
            }
            if address.is_some() {
                return Err(not_allowed("delivery_address", kind).into());
            }
            Ok(())
        }
    }
}

/// Table must exist for the tenant and be active
fn check_table(catalog: &dyn CatalogReader, tenant_id: i64, table_id: i64) -> ManagerResult<()> {
    match catalog.get_table(tenant_id, table_id)? {
        Some(table) if table.is_active => Ok(()),
        _ => Err(OrderError::TableNotFound(table_id).into()),
    }
}

fn not_allowed(field: &'static str, kind: OrderKind) -> OrderError {
    OrderError::FieldNotAllowed { field, kind }
}

/// Structural address check: required parts present, lengths bounded
pub fn validate_address(address: &DeliveryAddress) -> Result<(), OrderError> {
    let required = [
        ("street", &address.street),
        ("city", &address.city),
        ("postal_code", &address.postal_code),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(OrderError::DeliveryAddressInvalid(format!(
                "{field} is required"
            )));
        }
    }

    let bounded = [
        ("street", Some(address.street.as_str()), MAX_ADDRESS_LEN),
        ("complement", address.complement.as_deref(), MAX_ADDRESS_LEN),
        ("reference", address.reference.as_deref(), MAX_ADDRESS_LEN),
        ("number", address.number.as_deref(), MAX_SHORT_TEXT_LEN),
        ("city", Some(address.city.as_str()), MAX_SHORT_TEXT_LEN),
        ("postal_code", Some(address.postal_code.as_str()), MAX_SHORT_TEXT_LEN),
    ];
    for (field, value, max) in bounded {
        if exceeds(value, max) {
            return Err(OrderError::DeliveryAddressInvalid(format!(
                "{field} exceeds {max} characters"
            )));
        }
    }
    Ok(())
}

/// Explicit fee > tenant default > server default; zero unless Delivery
fn resolve_delivery_fee(
    ctx: &ValidationContext<'_>,
    kind: OrderKind,
    explicit: Option<Decimal>,
) -> ManagerResult<Decimal> {
    if explicit.is_some_and(|fee| fee < Decimal::ZERO || !is_money(fee)) {
        return Err(OrderError::InvalidDeliveryFee.into());
    }
    if kind != OrderKind::Delivery {
        return Ok(Decimal::ZERO);
    }
    if let Some(fee) = explicit {
        return Ok(fee);
    }
    let tenant_fee = ctx
        .storage
        .get_tenant_settings_txn(ctx.txn, ctx.tenant_id)?
        .and_then(|s| s.delivery_fee);
    Ok(tenant_fee.unwrap_or(ctx.default_delivery_fee))
}

fn validate_coupon(
    ctx: &ValidationContext<'_>,
    code: &str,
    subtotal: Decimal,
    customer_id: Option<i64>,
) -> ManagerResult<Coupon> {
    let coupon = ctx
        .coupons
        .get_by_code(ctx.txn, ctx.tenant_id, code)?
        .ok_or_else(|| OrderError::CouponNotFound(code.to_string()))?;

    let is_first_order = if coupon.first_order_only {
        match customer_id {
            Some(customer_id) => !ctx
                .storage
                .customer_has_orders_txn(ctx.txn, ctx.tenant_id, customer_id)?,
            // anonymous orders cannot prove a first order
            None => false,
        }
    } else {
        true
    };

    check_coupon(&coupon, ctx.now, subtotal, is_first_order)?;
    Ok(coupon)
}

/// Coupon rules against the computed subtotal
pub fn check_coupon(
    coupon: &Coupon,
    now: i64,
    subtotal: Decimal,
    is_first_order: bool,
) -> Result<(), OrderError> {
    let code = || coupon.code.clone();
    if !coupon.is_active {
        return Err(OrderError::CouponInactive(code()));
    }
    if coupon.is_before_window(now) {
        return Err(OrderError::CouponNotYetValid(code()));
    }
    if coupon.is_after_window(now) {
        return Err(OrderError::CouponExpired(code()));
    }
    if !coupon.has_remaining_usage() {
        return Err(OrderError::CouponUsageLimitReached(code()));
    }
    if let Some(min_order_value) = coupon.min_order_value {
        if subtotal < min_order_value {
            return Err(OrderError::CouponMinOrderNotMet {
                code: code(),
                min_order_value,
            });
        }
    }
    if coupon.first_order_only && !is_first_order {
        return Err(OrderError::CouponFirstOrderOnly(code()));
    }
    Ok(())
}

// ========== Update ==========

/// Validate an edit of the editable fields (notes, address, table)
pub fn validate_update(
    catalog: &dyn CatalogReader,
    order: &Order,
    req: &UpdateOrderRequest,
) -> ManagerResult<()> {
    check_expected_status(order, req.expected_status)?;
    if !order.status.is_editable() {
        return Err(OrderError::OrderNotEditable(order.status).into());
    }
    if let Some(field) = req.non_editable_field() {
        return Err(OrderError::FieldNotEditable(field).into());
    }
    check_text("notes", req.notes.as_deref(), MAX_NOTE_LEN)?;

    if let Some(address) = &req.delivery_address {
        if order.kind != OrderKind::Delivery {
            return Err(not_allowed("delivery_address", order.kind).into());
        }
        validate_address(address)?;
    }
    if let Some(table_id) = req.table_id {
        if order.kind != OrderKind::TableService {
            return Err(not_allowed("table_id", order.kind).into());
        }
        check_table(catalog, order.tenant_id, table_id)?;
    }
    Ok(())
}

// ========== Accept / Reject / Status ==========

pub fn validate_accept(order: &Order, req: &AcceptOrderRequest) -> Result<(), OrderError> {
    if order.status != OrderStatus::Pending {
        return Err(OrderError::InvalidStatusForAccept(order.status));
    }
    let minutes = req.estimated_preparation_minutes;
    if !(MIN_PREPARATION_MINUTES..=MAX_PREPARATION_MINUTES).contains(&minutes) {
        return Err(OrderError::InvalidPreparationTime(minutes));
    }
    check_text("notes", req.notes.as_deref(), MAX_NOTE_LEN)
}

/// Returns the trimmed reason
pub fn validate_reject(order: &Order, req: &RejectOrderRequest) -> Result<String, OrderError> {
    if order.status != OrderStatus::Pending {
        return Err(OrderError::InvalidStatusForReject(order.status));
    }
    let reason = req.reason.trim();
    let len = char_len(reason);
    if !(MIN_REJECTION_REASON_LEN..=MAX_REJECTION_REASON_LEN).contains(&len) {
        return Err(OrderError::InvalidRejectionReason);
    }
    check_text("notes", req.notes.as_deref(), MAX_NOTE_LEN)?;
    Ok(reason.to_string())
}

pub fn validate_status_change(order: &Order, req: &ChangeStatusRequest) -> Result<(), OrderError> {
    check_expected_status(order, req.expected_status)?;
    check_text("notes", req.notes.as_deref(), MAX_NOTE_LEN)?;
    transitions::check(order.status, req.status)
}

/// Compare-and-swap on the committed status
pub fn check_expected_status(
    order: &Order,
    expected: Option<OrderStatus>,
) -> Result<(), OrderError> {
    match expected {
        Some(expected) if expected != order.status => Err(OrderError::StaleStatus {
            expected,
            actual: order.status,
        }),
        _ => Ok(()),
    }
}

// ========== Helpers ==========

pub fn check_quantity(quantity: i32) -> Result<(), OrderError> {
    if (MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        Ok(())
    } else {
        Err(OrderError::InvalidQuantity(quantity))
    }
}

pub fn check_text(field: &'static str, value: Option<&str>, max: usize) -> Result<(), OrderError> {
    if exceeds(value, max) {
        Err(OrderError::TextTooLong { field, max })
    } else {
        Ok(())
    }
}
