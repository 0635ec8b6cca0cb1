//! 服务测试用的内存实现

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ExplorerError, Result};
use crate::models::catalog::Catalog;
use crate::models::session::{OrgInfo, Session};
use crate::remote::auth::StaticOrgInfoProvider;
use crate::remote::fetcher::RemoteFetcher;
use crate::remote::session::SessionHolder;
use crate::remote::transport::{Transport, Verb};
use crate::storage::snapshot::SnapshotStore;

/// 按路径表应答并按路径计数的传输层
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<HashMap<String, std::result::Result<String, String>>>,
    calls: Mutex<HashMap<String, usize>>,
    delay: Mutex<Option<Duration>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, body: &str) {
        self.responses
            .lock()
            .insert(path.to_string(), Ok(body.to_string()));
    }

    pub fn fail(&self, path: &str, message: &str) {
        self.responses
            .lock()
            .insert(path.to_string(), Err(message.to_string()));
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn calls(&self, path: &str) -> usize {
        self.calls.lock().get(path).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, _session: &Session, path: &str, _verb: Verb) -> Result<String> {
        *self.calls.lock().entry(path.to_string()).or_insert(0) += 1;
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let response = self.responses.lock().get(path).cloned();
        match response {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(ExplorerError::Fetch(message)),
            None => Err(ExplorerError::Fetch(format!("no route for {}", path))),
        }
    }
}

/// 内存快照存储
#[derive(Default)]
pub struct MemorySnapshotStore {
    catalog: Mutex<Option<Catalog>>,
    fail_writes: Mutex<bool>,
    saves: Mutex<usize>,
}

impl MemorySnapshotStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_catalog(catalog: Catalog) -> Arc<Self> {
        let store = Self::default();
        *store.catalog.lock() = Some(catalog);
        Arc::new(store)
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock() = true;
    }

    pub fn stored(&self) -> Option<Catalog> {
        self.catalog.lock().clone()
    }

    pub fn saves(&self) -> usize {
        *self.saves.lock()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Option<Catalog> {
        self.catalog.lock().clone()
    }

    async fn save(&self, catalog: &Catalog) -> Result<()> {
        *self.saves.lock() += 1;
        if *self.fail_writes.lock() {
            return Err(ExplorerError::Io("disk full".into()));
        }
        *self.catalog.lock() = Some(catalog.clone());
        Ok(())
    }
}

pub fn fetcher(transport: Arc<FakeTransport>) -> Arc<RemoteFetcher> {
    let provider = StaticOrgInfoProvider::new(OrgInfo::new("https://acme.my.salesforce.com", "t"));
    let sessions = Arc::new(SessionHolder::new(Arc::new(provider)));
    Arc::new(RemoteFetcher::new(sessions, transport, Duration::from_secs(5)))
}

pub fn global_describe(names: &[&str]) -> String {
    let sobjects: Vec<_> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "custom": name.ends_with("__c"),
                "urls": {"sobject": format!("/services/data/v42.0/sobjects/{}", name)}
            })
        })
        .collect();
    serde_json::json!({"encoding": "UTF-8", "maxBatchSize": 200, "sobjects": sobjects}).to_string()
}

pub fn describe_path(name: &str) -> String {
    format!("/services/data/v42.0/sobjects/{}/describe", name)
}
