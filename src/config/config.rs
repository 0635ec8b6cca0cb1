use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 快照存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// 快照目录
    pub dir: PathBuf,
    /// 快照文件名
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./.sobject-explorer"),
            file_name: "sobjects.json".into(),
        }
    }
}

impl StorageConfig {
    /// 快照文件完整路径
    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// 远程数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// REST API 版本，例如 "42.0"
    pub api_version: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_version: "42.0".into(),
            request_timeout_secs: 30,
        }
    }
}

impl RemoteConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 认证方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// 通过 CLI 的 `force:org:display` 获取
    #[default]
    Cli,
    /// 直接使用配置中的 URL 和 token
    Static,
}

/// 认证配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 认证方式
    pub mode: AuthMode,
    /// CLI 可执行文件
    pub cli_program: String,
    /// 目标 org 别名或用户名
    pub target_org: Option<String>,
    /// 实例地址（static 模式）
    pub instance_url: Option<String>,
    /// 访问令牌（static 模式）
    pub access_token: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::Cli,
            cli_program: "sfdx".into(),
            target_org: None,
            instance_url: None,
            access_token: None,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            structured: false,
            log_dir: None,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExplorerConfig {
    /// 快照存储配置
    pub storage: StorageConfig,
    /// 远程数据源配置
    pub remote: RemoteConfig,
    /// 认证配置
    pub auth: AuthConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

impl ExplorerConfig {
    /// 使用固定凭据的配置，主要用于脚本和测试
    pub fn with_static_auth(instance_url: &str, access_token: &str) -> Self {
        let mut config = Self::default();
        config.auth.mode = AuthMode::Static;
        config.auth.instance_url = Some(instance_url.into());
        config.auth.access_token = Some(access_token.into());
        config
    }
}
