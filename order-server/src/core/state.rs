use std::sync::Arc;

use super::seed;
use super::{Config, Result};
use crate::catalog::CatalogSnapshot;
use crate::orders::{OrderStorage, OrdersManager};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，handler 之间共享。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | catalog | CatalogSnapshot | 商品目录只读快照 |
/// | orders | Arc<OrdersManager> | 订单生命周期 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub catalog: CatalogSnapshot,
    pub orders: Arc<OrdersManager>,
}

impl ServerState {
    /// 初始化：创建工作目录、打开数据库、加载种子数据
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let storage = OrderStorage::open(config.database_path())?;
        let catalog = CatalogSnapshot::new();
        seed::load_seed_file(&config.seed_path(), &catalog, &storage)?;

        let orders = OrdersManager::new(
            storage,
            Arc::new(catalog.clone()),
            config.default_delivery_fee,
        );
        tracing::info!(
            db = %config.database_path().display(),
            default_delivery_fee = %config.default_delivery_fee,
            "Order storage ready"
        );

        Ok(Self::with_parts(config.clone(), catalog, orders))
    }

    /// 由现成组件组装 (测试用)
    pub fn with_parts(config: Config, catalog: CatalogSnapshot, orders: OrdersManager) -> Self {
        Self {
            config,
            catalog,
            orders: Arc::new(orders),
        }
    }
}
