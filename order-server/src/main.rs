use order_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量 (.env 可选)
    let _ = dotenv::dotenv();

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 日志 (生产环境额外写入滚动文件)
    let log_dir = config.log_dir();
    let file_dir = config
        .is_production()
        .then(|| log_dir.to_string_lossy().into_owned());
    init_logger_with_file(&config.log_level, config.log_json, file_dir.as_deref())?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Order server starting...");

    // 4. 初始化服务器状态
    let state = ServerState::initialize(&config)?;

    // 5. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
