use crate::orders::{ManagerError, StorageError};
use thiserror::Error;

/// 启动/运行期错误 (请求级错误走 AppError)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    #[error("订单服务错误: {0}")]
    Orders(#[from] ManagerError),

    #[error("种子数据错误: {0}")]
    Seed(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
