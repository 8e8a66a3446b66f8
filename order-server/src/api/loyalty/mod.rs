//! Loyalty API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/loyalty/{customer_id}/balance | GET | 未过期积分余额 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/loyalty", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/{customer_id}/balance", get(handler::balance))
}
