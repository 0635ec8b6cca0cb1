//! 错误处理模块
//!
//! 定义 sObject Explorer 的错误类型。远程与认证错误会传给调用方，
//! 快照损坏只在存储层内部出现。

use thiserror::Error;

/// Explorer 错误类型
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// 会话无法建立
    #[error("认证失败: {0}")]
    Auth(String),

    /// 远程调用失败（含超时和无效响应）
    #[error("远程请求失败: {0}")]
    Fetch(String),

    /// 快照文件损坏，仅在存储层内部使用
    #[error("缓存文件损坏: {0}")]
    CorruptCache(String),

    /// 请求的对象或字段不存在
    #[error("资源不存在: {0}")]
    NotFound(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExplorerError {
    fn from(e: std::io::Error) -> Self {
        ExplorerError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(e: serde_json::Error) -> Self {
        ExplorerError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for ExplorerError {
    fn from(e: reqwest::Error) -> Self {
        ExplorerError::Fetch(e.to_string())
    }
}

impl From<figment::Error> for ExplorerError {
    fn from(e: figment::Error) -> Self {
        ExplorerError::Config(e.to_string())
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, ExplorerError>;
