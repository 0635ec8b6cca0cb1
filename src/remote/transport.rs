//! 传输层及其 reqwest 实现

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::fmt;
use std::time::Duration;

use crate::config::config::RemoteConfig;
use crate::error::{ExplorerError, Result};
use crate::models::session::Session;

/// 请求方法，只发起读取
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Get => write!(f, "GET"),
        }
    }
}

/// 根据路径和方法返回原始响应体
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, session: &Session, path: &str, verb: Verb) -> Result<String>;
}

/// 错误信息中保留的最大响应长度
const ERROR_BODY_LIMIT: usize = 512;

/// 基于 reqwest 的 REST 传输
pub struct HttpTransport {
    client: reqwest::Client,
    api_version: String,
}

impl HttpTransport {
    pub fn new(api_version: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_version: api_version.to_string(),
        })
    }

    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        Self::new(&config.api_version, config.request_timeout())
    }

    /// 资源路径（`/services/...`）直接拼在实例地址后，
    /// 其余路径相对于带版本的数据 API
    pub fn url_for(&self, session: &Session, path: &str) -> String {
        if path.starts_with("/services/") {
            format!("{}{}", session.base_url(), path)
        } else {
            format!(
                "{}/services/data/v{}/{}",
                session.base_url(),
                self.api_version,
                path.trim_start_matches('/')
            )
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, session: &Session, path: &str, verb: Verb) -> Result<String> {
        let url = self.url_for(session, path);
        tracing::debug!("{} {}", verb, url);

        let request = match verb {
            Verb::Get => self.client.get(&url),
        };

        let response = request
            .header(AUTHORIZATION, format!("Bearer {}", session.token()))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let excerpt: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(ExplorerError::Fetch(format!(
                "{} {} returned {}: {}",
                verb, path, status, excerpt
            )));
        }

        Ok(body)
    }
}
