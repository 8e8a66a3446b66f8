//! Order Server - 多租户点餐订单服务
//!
//! # 架构概述
//!
//! 订单生命周期与计价引擎：从购物车创建订单、计算金额（商品、加料、
//! 优惠券、配送费）、执行状态机、并在状态变化时触发副作用
//! （积分累计、排队号释放、拒单记录）。
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── catalog/       # 商品目录只读快照
//! ├── pricing/       # 纯函数计价
//! ├── orders/        # 订单校验、状态机、存储、副作用
//! └── utils/         # 日志、错误
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod orders;
pub mod pricing;
pub mod utils;

// Re-export 公共类型
pub use catalog::{CatalogReader, CatalogSnapshot};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderStorage, OrdersManager};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode, ErrorKind};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
