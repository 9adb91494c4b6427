use tracing_subscriber::EnvFilter;

use crate::core::constants;

/// 初始化日志
///
/// 日志只写到 stderr，stdout 留给报告输出。过滤规则来自 `JAVA_CONFIG_LOG`。
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(constants::env::LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::new(constants::log::DEFAULT_LOG_LEVEL));

    // 已经装好订阅者时（例如测试中重复初始化）保留原有的
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
