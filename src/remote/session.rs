//! 会话管理
//!
//! 首次使用时建立会话，之后一直返回同一个会话。并发的首次调用共享一次认证，
//! 认证失败不缓存，下一次调用会重试。

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::info;

use crate::error::{ExplorerError, Result};
use crate::models::session::Session;
use crate::remote::auth::OrgInfoProvider;

pub struct SessionHolder {
    provider: Arc<dyn OrgInfoProvider>,
    session: OnceCell<Arc<Session>>,
    timeout: Option<Duration>,
}

impl SessionHolder {
    pub fn new(provider: Arc<dyn OrgInfoProvider>) -> Self {
        Self {
            provider,
            session: OnceCell::new(),
            timeout: None,
        }
    }

    /// 限制认证耗时，超时视为认证失败
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn ensure_session(&self) -> Result<Arc<Session>> {
        let session = self
            .session
            .get_or_try_init(|| self.connect())
            .await?;
        Ok(session.clone())
    }

    /// 已建立的会话，不做任何 I/O
    pub fn current(&self) -> Option<Arc<Session>> {
        self.session.get().cloned()
    }

    async fn connect(&self) -> Result<Arc<Session>> {
        let handshake = self.provider.get_org_info();
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, handshake)
                .await
                .map_err(|_| ExplorerError::Auth(format!("handshake timed out after {:?}", limit)))?,
            None => handshake.await,
        };

        let info = result.map_err(|e| match e {
            ExplorerError::Auth(_) => e,
            other => ExplorerError::Auth(other.to_string()),
        })?;

        let session = Session::from(&info);
        info!(
            "Connected to org {} at {}",
            info.display_name(),
            session.established_at().to_rfc3339()
        );
        Ok(Arc::new(session))
    }
}
