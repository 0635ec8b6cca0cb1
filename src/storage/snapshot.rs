//! 磁盘快照存储
//!
//! 把目录保存为单个 JSON 文件。无法解析的文件会被删除并视为不存在，
//! 不会作为错误返回。

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::config::StorageConfig;
use crate::error::{ExplorerError, Result};
use crate::models::catalog::Catalog;

/// 目录快照存储接口
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// 没有可用快照时返回 `None`
    async fn load(&self) -> Option<Catalog>;

    /// 保存目录，调用方把失败视为非致命
    async fn save(&self, catalog: &Catalog) -> Result<()>;
}

/// 解析快照内容，任何失败都视为损坏
pub fn parse_snapshot(raw: &[u8]) -> Result<Catalog> {
    serde_json::from_slice(raw).map_err(|e| ExplorerError::CorruptCache(e.to_string()))
}

/// 存放在 `<dir>/<file_name>` 的快照
pub struct FileSnapshotStore {
    dir: PathBuf,
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>, file_name: &str) -> Self {
        let dir = dir.into();
        let path = dir.join(file_name);
        Self { dir, path }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.dir.clone(), &config.file_name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn discard(&self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => info!("Removed corrupt snapshot {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove corrupt snapshot {}: {}", self.path.display(), e),
        }
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Option<Catalog> {
        debug!("Attempting to load sObjects from {}", self.path.display());

        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read snapshot {}: {}", self.path.display(), e);
                return None;
            }
        };

        match parse_snapshot(&raw) {
            Ok(catalog) => {
                info!("Loaded {} sObjects from snapshot", catalog.len());
                Some(catalog)
            }
            Err(e) => {
                warn!("Discarding snapshot {}: {}", self.path.display(), e);
                self.discard().await;
                None
            }
        }
    }

    async fn save(&self, catalog: &Catalog) -> Result<()> {
        let json = serde_json::to_vec(catalog)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        // 先写临时文件再重命名，读取方不会看到写了一半的文件
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        info!("Saved {} sObjects to {}", catalog.len(), self.path.display());
        Ok(())
    }
}
