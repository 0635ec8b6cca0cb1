//! 对象描述缓存
//!
//! 按资源 ID 缓存 describe 结果，只在内存中保存，生命周期与进程相同，
//! 刷新目录不会清除。同一对象的并发首次请求共享一次 describe，
//! 失败不缓存，下一次请求会重试。

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::Result;
use crate::models::catalog::ResourceId;
use crate::models::description::Description;
use crate::remote::fetcher::RemoteFetcher;

type Slot = Arc<OnceCell<Arc<Description>>>;

pub struct DescriptionCache {
    fetcher: Arc<RemoteFetcher>,
    entries: DashMap<ResourceId, Slot>,
}

impl DescriptionCache {
    pub fn new(fetcher: Arc<RemoteFetcher>) -> Self {
        Self {
            fetcher,
            entries: DashMap::new(),
        }
    }

    pub async fn get_description(&self, resource: &ResourceId) -> Result<Arc<Description>> {
        // 先克隆槽位，避免跨 await 持有 map 锁
        let slot: Slot = self.entries.entry(resource.clone()).or_default().clone();

        if let Some(description) = slot.get() {
            debug!("Description cache hit for {}", resource);
            return Ok(description.clone());
        }

        let description = slot
            .get_or_try_init(|| async {
                debug!("Description cache miss for {}", resource);
                self.fetcher.describe(resource).await.map(Arc::new)
            })
            .await?;
        Ok(description.clone())
    }

    /// 已描述的对象数量
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|slot| slot.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
