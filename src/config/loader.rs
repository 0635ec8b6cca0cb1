use crate::config::config::{AuthMode, ExplorerConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "SOBJECT_EXPLORER_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 搜索路径：
    /// 1. ./sobject-explorer.toml
    /// 2. 环境变量
    pub fn load() -> Result<ExplorerConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<ExplorerConfig, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(ExplorerConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &ExplorerConfig) -> Result<(), ConfigValidationError> {
        if config.remote.request_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if config.remote.api_version.trim().is_empty() {
            return Err(ConfigValidationError::MissingApiVersion);
        }

        if config.storage.file_name.trim().is_empty() {
            return Err(ConfigValidationError::InvalidPath(
                config.storage.snapshot_path().display().to_string(),
            ));
        }

        if config.auth.mode == AuthMode::Static {
            let has = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
            if !has(&config.auth.instance_url) || !has(&config.auth.access_token) {
                return Err(ConfigValidationError::MissingStaticCredentials);
            }
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("请求超时无效，必须大于 0")]
    InvalidTimeout,

    #[error("API 版本未配置")]
    MissingApiVersion,

    #[error("static 认证模式需要 instance_url 和 access_token")]
    MissingStaticCredentials,

    #[error("快照路径无效: {0}")]
    InvalidPath(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("sobject-explorer.toml")
}
