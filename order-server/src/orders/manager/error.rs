use super::super::error::OrderError;
use super::super::loyalty::LoyaltyError;
use super::super::storage::StorageError;
use crate::catalog::CatalogError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Manager errors
///
/// `Order` carries expected business violations; every other variant is an
/// infrastructure failure that aborts the enclosing transaction.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Loyalty error: {0}")]
    Loyalty(#[from] LoyaltyError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ManagerError {
    /// Business failure, if this is one
    pub fn as_order_error(&self) -> Option<&OrderError> {
        match self {
            Self::Order(e) => Some(e),
            _ => None,
        }
    }
}

impl From<redb::CommitError> for ManagerError {
    fn from(err: redb::CommitError) -> Self {
        Self::Storage(StorageError::Commit(err))
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// 将存储错误转换为错误码
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    if let StorageError::Serialization(_) = e {
        return ErrorCode::InternalError;
    }

    // redb 错误通过字符串匹配分类
    let err_str = e.to_string().to_lowercase();

    // 磁盘空间不足
    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return ErrorCode::StorageFull;
    }

    // 内存不足
    if err_str.contains("out of memory") || err_str.contains("cannot allocate") {
        return ErrorCode::OutOfMemory;
    }

    // 数据损坏
    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }

    // 默认：系统繁忙
    ErrorCode::SystemBusy
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match &err {
            OrderError::ProductNotFound(id) => app.with_detail("product_id", *id),
            OrderError::ProductInactive(name) => app.with_detail("product", name.as_str()),
            OrderError::ModifierNotFound(id) => app.with_detail("modifier_id", *id),
            OrderError::TableNotFound(id) => app.with_detail("table_id", *id),
            OrderError::OrderNotFound(id) => app.with_detail("order_id", *id),
            OrderError::FieldNotAllowed { field, .. }
            | OrderError::TextTooLong { field, .. }
            | OrderError::FieldNotEditable(field) => app.with_detail("field", *field),
            OrderError::InvalidStatusTransition { from, to } => app
                .with_detail("from", from.as_str())
                .with_detail("to", to.as_str()),
            OrderError::StaleStatus { expected, actual } => app
                .with_detail("expected", expected.as_str())
                .with_detail("actual", actual.as_str()),
            _ => app,
        }
    }
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Order(e) => e.into(),
            ManagerError::Storage(e) => {
                let code = classify_storage_error(&e);
                // 技术细节只进日志，调用方只看到通用信息
                tracing::error!(error = %e, error_code = ?code, "Storage error occurred");
                AppError::new(code)
            }
            ManagerError::Catalog(e) => {
                tracing::error!(error = %e, "Catalog lookup failed");
                AppError::new(ErrorCode::SystemBusy)
            }
            ManagerError::Loyalty(e) => {
                tracing::error!(error = %e, "Loyalty accrual failed");
                AppError::new(ErrorCode::LoyaltyAccrualFailed)
            }
            ManagerError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal order error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}
