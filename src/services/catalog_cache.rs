//! 目录缓存服务
//!
//! 依次从内存、磁盘快照、远程全局 describe 获取目录。
//! `refresh` 总是访问远程，并同时覆盖内存副本和快照。

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::catalog::Catalog;
use crate::remote::fetcher::RemoteFetcher;
use crate::storage::snapshot::SnapshotStore;

/// 目录请求的命中来源统计
#[derive(Debug, Default)]
pub struct CatalogStats {
    memory_hits: AtomicU64,
    disk_loads: AtomicU64,
    remote_fetches: AtomicU64,
    persist_failures: AtomicU64,
}

/// `CatalogStats` 的快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStatsSnapshot {
    pub memory_hits: u64,
    pub disk_loads: u64,
    pub remote_fetches: u64,
    pub persist_failures: u64,
}

impl CatalogStats {
    pub fn snapshot(&self) -> CatalogStatsSnapshot {
        CatalogStatsSnapshot {
            memory_hits: self.memory_hits.load(Ordering::SeqCst),
            disk_loads: self.disk_loads.load(Ordering::SeqCst),
            remote_fetches: self.remote_fetches.load(Ordering::SeqCst),
            persist_failures: self.persist_failures.load(Ordering::SeqCst),
        }
    }
}

pub struct CatalogCache {
    fetcher: Arc<RemoteFetcher>,
    store: Arc<dyn SnapshotStore>,
    current: RwLock<Option<Arc<Catalog>>>,
    /// 从磁盘或远程解析时持有，并发调用方共享同一次解析
    resolving: Mutex<()>,
    stats: CatalogStats,
}

impl CatalogCache {
    pub fn new(fetcher: Arc<RemoteFetcher>, store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            fetcher,
            store,
            current: RwLock::new(None),
            resolving: Mutex::new(()),
            stats: CatalogStats::default(),
        }
    }

    /// 获取当前目录，之后的刷新不会改变已返回的值
    pub async fn get_catalog(&self) -> Result<Arc<Catalog>> {
        if let Some(catalog) = self.memory() {
            return Ok(catalog);
        }

        let _guard = self.resolving.lock().await;
        if let Some(catalog) = self.memory() {
            return Ok(catalog);
        }

        if let Some(catalog) = self.store.load().await {
            self.stats.disk_loads.fetch_add(1, Ordering::SeqCst);
            debug!("Adopted catalog snapshot ({} sObjects)", catalog.len());
            return Ok(self.adopt(catalog));
        }

        self.fetch_and_persist().await
    }

    /// 无论内存和磁盘状态如何，都从远程获取
    pub async fn refresh(&self) -> Result<Arc<Catalog>> {
        info!("Refreshing sObjects");
        let _guard = self.resolving.lock().await;
        self.fetch_and_persist().await
    }

    /// 已解析的内存目录
    pub fn cached(&self) -> Option<Arc<Catalog>> {
        self.current.read().clone()
    }

    pub fn stats(&self) -> CatalogStatsSnapshot {
        self.stats.snapshot()
    }

    fn memory(&self) -> Option<Arc<Catalog>> {
        let catalog = self.current.read().clone();
        if catalog.is_some() {
            self.stats.memory_hits.fetch_add(1, Ordering::SeqCst);
        }
        catalog
    }

    fn adopt(&self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        *self.current.write() = Some(catalog.clone());
        catalog
    }

    async fn fetch_and_persist(&self) -> Result<Arc<Catalog>> {
        info!("Getting sObjects from server");
        let catalog = self.fetcher.list_catalog().await?;
        self.stats.remote_fetches.fetch_add(1, Ordering::SeqCst);

        if let Err(e) = self.store.save(&catalog).await {
            self.stats.persist_failures.fetch_add(1, Ordering::SeqCst);
            warn!("Failed to persist catalog snapshot: {}", e);
        }

        Ok(self.adopt(catalog))
    }
}
