//! Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use sobject_explorer::error::{ExplorerError, Result};
use sobject_explorer::models::{OrgInfo, Session};
use sobject_explorer::remote::{OrgInfoProvider, Transport, Verb};

/// Counts handshakes; fails while `offline` is set.
#[derive(Default)]
pub struct CountingAuth {
    pub handshakes: AtomicUsize,
    pub offline: Mutex<bool>,
}

impl CountingAuth {
    pub fn online() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn offline() -> Arc<Self> {
        let auth = Self::default();
        *auth.offline.lock() = true;
        Arc::new(auth)
    }

    pub fn handshakes(&self) -> usize {
        self.handshakes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrgInfoProvider for CountingAuth {
    async fn get_org_info(&self) -> Result<OrgInfo> {
        self.handshakes.fetch_add(1, Ordering::SeqCst);
        if *self.offline.lock() {
            return Err(ExplorerError::Auth("no network".into()));
        }
        Ok(OrgInfo::new("https://acme.my.salesforce.com", "00D!token"))
    }
}

/// Path-table transport recording every request.
#[derive(Default)]
pub struct RecordingTransport {
    routes: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(&self, path: &str, body: impl Into<String>) {
        self.routes.lock().insert(path.to_string(), body.into());
    }

    /// Hold every response for `delay` so concurrent callers overlap.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests.lock().iter().filter(|p| *p == path).count()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, _session: &Session, path: &str, _verb: Verb) -> Result<String> {
        self.requests.lock().push(path.to_string());
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.routes
            .lock()
            .get(path)
            .cloned()
            .ok_or_else(|| ExplorerError::Fetch(format!("404 {}", path)))
    }
}

pub fn sobject_path(name: &str) -> String {
    format!("/services/data/v42.0/sobjects/{}", name)
}

pub fn describe_path(name: &str) -> String {
    format!("{}/describe", sobject_path(name))
}

pub fn global_describe(names: &[&str]) -> String {
    let sobjects: Vec<_> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "label": name,
                "custom": false,
                "queryable": true,
                "urls": {
                    "sobject": sobject_path(name),
                    "describe": describe_path(name)
                }
            })
        })
        .collect();
    serde_json::json!({"encoding": "UTF-8", "maxBatchSize": 200, "sobjects": sobjects}).to_string()
}

pub const ACCOUNT_DESCRIBE: &str = r#"{
    "name": "Account",
    "fields": [
        {"name": "Id", "type": "id", "label": "Account ID"},
        {"name": "Name", "type": "string", "label": "Account Name", "length": 255}
    ]
}"#;
