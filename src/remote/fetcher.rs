//! 远程获取
//!
//! 每个逻辑操作对应一次请求，使用共享会话，并受请求超时限制。

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::error::{ExplorerError, Result};
use crate::models::catalog::{Catalog, GlobalDescribeResponse, ResourceId};
use crate::models::description::Description;
use crate::remote::session::SessionHolder;
use crate::remote::transport::{Transport, Verb};

/// 全局 describe 路径，相对于数据 API
pub const GLOBAL_DESCRIBE_PATH: &str = "sobjects";

pub struct RemoteFetcher {
    sessions: Arc<SessionHolder>,
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl RemoteFetcher {
    pub fn new(sessions: Arc<SessionHolder>, transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self {
            sessions,
            transport,
            timeout,
        }
    }

    async fn get(&self, path: &str) -> Result<String> {
        let session = self.sessions.ensure_session().await?;
        tokio::time::timeout(self.timeout, self.transport.execute(&session, path, Verb::Get))
            .await
            .map_err(|_| {
                ExplorerError::Fetch(format!("GET {} timed out after {:?}", path, self.timeout))
            })?
    }

    /// 全局 describe：会话可见的所有 sObject
    pub async fn list_catalog(&self) -> Result<Catalog> {
        let body = self.get(GLOBAL_DESCRIBE_PATH).await?;
        let response: GlobalDescribeResponse = serde_json::from_str(&body)
            .map_err(|e| ExplorerError::Fetch(format!("invalid global describe payload: {}", e)))?;
        debug!("Global describe returned {} sObjects", response.sobjects.len());
        Ok(response.sobjects)
    }

    /// 单个 sObject 的字段结构
    pub async fn describe(&self, resource: &ResourceId) -> Result<Description> {
        let body = self.get(&resource.describe_path()).await?;
        let description: Description = serde_json::from_str(&body).map_err(|e| {
            ExplorerError::Fetch(format!("invalid describe payload for {}: {}", resource, e))
        })?;
        description.validate().map_err(|msg| {
            ExplorerError::Fetch(format!("invalid describe payload for {}: {}", resource, msg))
        })?;
        debug!("Described {} ({} fields)", resource, description.fields.len());
        Ok(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::{OrgInfo, Session};
    use crate::remote::auth::StaticOrgInfoProvider;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// 返回固定响应并记录请求路径
    struct CannedTransport {
        body: String,
        delay: Option<Duration>,
        paths: Mutex<Vec<String>>,
    }

    impl CannedTransport {
        fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                delay: None,
                paths: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn execute(&self, _session: &Session, path: &str, _verb: Verb) -> Result<String> {
            self.paths.lock().push(path.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(self.body.clone())
        }
    }

    fn fetcher(transport: Arc<CannedTransport>, timeout: Duration) -> RemoteFetcher {
        let provider = StaticOrgInfoProvider::new(OrgInfo::new("https://acme.my.salesforce.com", "t"));
        let sessions = Arc::new(SessionHolder::new(Arc::new(provider)));
        RemoteFetcher::new(sessions, transport, timeout)
    }

    #[tokio::test]
    async fn test_list_catalog() {
        let transport = Arc::new(CannedTransport::new(
            r#"{"encoding":"UTF-8","maxBatchSize":200,"sobjects":[
                {"name":"Account","custom":false,"urls":{"sobject":"/services/data/v42.0/sobjects/Account"}},
                {"name":"Contact","custom":false,"urls":{"sobject":"/services/data/v42.0/sobjects/Contact"}}
            ]}"#,
        ));
        let fetcher = fetcher(transport.clone(), Duration::from_secs(5));

        let catalog = fetcher.list_catalog().await.unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Account", "Contact"]);
        assert_eq!(transport.paths.lock().as_slice(), ["sobjects"]);
    }

    #[tokio::test]
    async fn test_describe_uses_resource_path() {
        let transport = Arc::new(CannedTransport::new(
            r#"{"fields":[{"name":"Id","type":"id"},{"name":"Name","type":"string"}]}"#,
        ));
        let fetcher = fetcher(transport.clone(), Duration::from_secs(5));

        let description = fetcher
            .describe(&ResourceId::new("/services/data/v42.0/sobjects/Account"))
            .await
            .unwrap();
        assert_eq!(description.fields.len(), 2);
        assert_eq!(
            transport.paths.lock().as_slice(),
            ["/services/data/v42.0/sobjects/Account/describe"]
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_is_fetch_error() {
        let transport = Arc::new(CannedTransport::new(r#"{"sobjects": "nope"}"#));
        let fetcher = fetcher(transport, Duration::from_secs(5));
        assert!(matches!(
            fetcher.list_catalog().await,
            Err(ExplorerError::Fetch(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_fields_are_fetch_error() {
        let transport = Arc::new(CannedTransport::new(
            r#"{"fields":[{"name":"","type":"id"}]}"#,
        ));
        let fetcher = fetcher(transport, Duration::from_secs(5));
        assert!(matches!(
            fetcher.describe(&ResourceId::new("/x/Account")).await,
            Err(ExplorerError::Fetch(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_maps_to_fetch_error() {
        let mut transport = CannedTransport::new("{}");
        transport.delay = Some(Duration::from_secs(60));
        let fetcher = fetcher(Arc::new(transport), Duration::from_secs(1));

        let err = fetcher.list_catalog().await.unwrap_err();
        assert!(matches!(err, ExplorerError::Fetch(msg) if msg.contains("timed out")));
    }
}
