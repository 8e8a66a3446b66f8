use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::LoyaltyBalance;

use crate::api::extractor::TenantContext;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ok};

/// Points balance of a customer
pub async fn balance(
    State(state): State<ServerState>,
    ctx: TenantContext,
    Path(customer_id): Path<i64>,
) -> AppResult<Json<ApiResponse<LoyaltyBalance>>> {
    let balance = state.orders.loyalty_balance(ctx.tenant_id, customer_id)?;
    Ok(ok(balance))
}
