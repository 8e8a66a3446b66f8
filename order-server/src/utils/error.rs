//! 统一错误处理
//!
//! 错误类型统一来自 `shared::error`，这里只补充响应辅助函数。
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::with_message(ErrorCode::OrderNotFound, "Order 42 not found"))
//!
//! // 返回成功响应
//! Ok(ok(order))
//! ```

use axum::Json;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode, ErrorKind};

/// Wrap data in a success envelope
pub fn ok<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}
