//! 可观测性模块
//!
//! 初始化 tracing 日志：控制台输出，可选 JSON 格式和按天滚动的日志文件。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::config::LoggingConfig;
use crate::error::{ExplorerError, Result};

/// 日志文件名前缀
const LOG_FILE_PREFIX: &str = "sobject-explorer.log";

/// `RUST_LOG` 优先于配置中的级别
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// 安装全局 subscriber
///
/// 配置了 `log_dir` 时返回文件写入器的 guard，调用方需持有到进程结束。
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let console = if config.structured {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false).json();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| ExplorerError::Config(format!("logging already initialised: {}", e)))?;

    Ok(guard)
}
