//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::order::{
    AcceptOrderRequest, ChangeStatusRequest, CreateOrderRequest, Order, OrderDetail,
    OrderListQuery, OrderPage, OrderQuote, QueueEntry, RecordPaymentRequest, RejectOrderRequest,
    UpdateOrderRequest,
};

use crate::api::extractor::TenantContext;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ok};

type ApiJson<T> = Json<ApiResponse<T>>;

/// Create order
///
/// 201 for a new order, 200 when the idempotency key replays an existing one
pub async fn create(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, ApiJson<Order>)> {
    let outcome = state
        .orders
        .create_order(ctx.tenant_id, ctx.actor, payload)?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, ok(outcome.order)))
}

/// Price a cart without persisting it
pub async fn validate(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<ApiJson<OrderQuote>> {
    let quote = state.orders.validate_order(ctx.tenant_id, &payload)?;
    Ok(ok(quote))
}

/// List orders of the tenant (paginated)
pub async fn list(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Query(query): Query<OrderListQuery>,
) -> AppResult<ApiJson<OrderPage>> {
    let page = state.orders.list_orders(ctx.tenant_id, &query)?;
    Ok(ok(page))
}

/// Live TableService queue
pub async fn queue(
    State(state): State<ServerState>,
    ctx: TenantContext,
) -> AppResult<ApiJson<Vec<QueueEntry>>> {
    let entries = state.orders.current_queue(ctx.tenant_id)?;
    Ok(ok(entries))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(id): Path<i64>,
) -> AppResult<ApiJson<OrderDetail>> {
    let detail = state.orders.get_order(ctx.tenant_id, id)?;
    Ok(ok(detail))
}

/// Update editable fields
pub async fn update(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<ApiJson<Order>> {
    let order = state.orders.update_order(ctx.tenant_id, id, payload)?;
    Ok(ok(order))
}

pub async fn accept(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(id): Path<i64>,
    Json(payload): Json<AcceptOrderRequest>,
) -> AppResult<ApiJson<Order>> {
    let order = state
        .orders
        .accept_order(ctx.tenant_id, id, ctx.actor, payload)?;
    Ok(ok(order))
}

pub async fn reject(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(id): Path<i64>,
    Json(payload): Json<RejectOrderRequest>,
) -> AppResult<ApiJson<Order>> {
    let order = state
        .orders
        .reject_order(ctx.tenant_id, id, ctx.actor, payload)?;
    Ok(ok(order))
}

pub async fn change_status(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(id): Path<i64>,
    Json(payload): Json<ChangeStatusRequest>,
) -> AppResult<ApiJson<Order>> {
    let order = state
        .orders
        .change_status(ctx.tenant_id, id, ctx.actor, payload)?;
    Ok(ok(order))
}

/// Consumed payment state
pub async fn record_payment(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(id): Path<i64>,
    Json(payload): Json<RecordPaymentRequest>,
) -> AppResult<ApiJson<Order>> {
    let order = state.orders.record_payment(ctx.tenant_id, id, payload)?;
    Ok(ok(order))
}
