//! 服务模块

pub mod catalog_cache;
pub mod description_cache;
pub mod explorer;
pub mod render;

#[cfg(test)]
pub(crate) mod fakes;

pub use catalog_cache::{CatalogCache, CatalogStatsSnapshot};
pub use description_cache::DescriptionCache;
pub use explorer::{Children, SObjectExplorer};
pub use render::{FieldRenderer, TextFieldRenderer};

use std::sync::Arc;

use crate::config::config::ExplorerConfig;
use crate::config::loader::ConfigLoader;
use crate::error::{ExplorerError, Result};
use crate::remote::auth::{OrgInfoProvider, create_org_info_provider};
use crate::remote::fetcher::RemoteFetcher;
use crate::remote::session::SessionHolder;
use crate::remote::transport::{HttpTransport, Transport};
use crate::storage::snapshot::{FileSnapshotStore, SnapshotStore};

/// 用给定的依赖组装 Explorer
pub fn create_explorer_with(
    config: &ExplorerConfig,
    provider: Arc<dyn OrgInfoProvider>,
    transport: Arc<dyn Transport>,
    store: Arc<dyn SnapshotStore>,
) -> SObjectExplorer {
    let timeout = config.remote.request_timeout();
    let sessions = Arc::new(SessionHolder::new(provider).with_timeout(timeout));
    let fetcher = Arc::new(RemoteFetcher::new(sessions, transport, timeout));

    SObjectExplorer::new(
        Arc::new(CatalogCache::new(fetcher.clone(), store)),
        Arc::new(DescriptionCache::new(fetcher)),
        Arc::new(TextFieldRenderer),
    )
}

/// 根据配置创建 Explorer
pub fn create_explorer(config: &ExplorerConfig) -> Result<SObjectExplorer> {
    ConfigLoader::validate(config).map_err(|e| ExplorerError::Config(e.to_string()))?;

    let provider: Arc<dyn OrgInfoProvider> = Arc::from(create_org_info_provider(&config.auth)?);
    let transport = Arc::new(HttpTransport::from_config(&config.remote)?);
    let store = Arc::new(FileSnapshotStore::from_config(&config.storage));

    Ok(create_explorer_with(config, provider, transport, store))
}
