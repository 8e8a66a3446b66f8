//! Order API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders | POST | 创建订单 (重复 client_request_id 返回原订单) |
//! | /api/orders | GET | 分页列表 (page, per_page, status) |
//! | /api/orders/validate | POST | 只计价不落库 |
//! | /api/orders/queue | GET | 堂食排队 |
//! | /api/orders/{id} | GET | 详情 (含状态历史、拒单记录) |
//! | /api/orders/{id} | PUT | 修改备注/地址/桌台 |
//! | /api/orders/{id}/accept | POST | 接单 |
//! | /api/orders/{id}/reject | POST | 拒单 |
//! | /api/orders/{id}/status | POST | 状态变更 |
//! | /api/orders/{id}/payment | POST | 记录支付状态 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/validate", post(handler::validate))
        .route("/queue", get(handler::queue))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        // 状态流转
        .route("/{id}/accept", post(handler::accept))
        .route("/{id}/reject", post(handler::reject))
        .route("/{id}/status", post(handler::change_status))
        .route("/{id}/payment", post(handler::record_payment))
}
