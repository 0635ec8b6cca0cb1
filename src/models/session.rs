//! 会话模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 认证结果
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgInfo {
    pub instance_url: String,
    pub access_token: String,
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl OrgInfo {
    pub fn new(instance_url: &str, access_token: &str) -> Self {
        Self {
            instance_url: instance_url.to_string(),
            access_token: access_token.to_string(),
            org_name: None,
            username: None,
        }
    }

    /// 日志中使用的名称，不包含 token
    pub fn display_name(&self) -> &str {
        self.org_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(&self.instance_url)
    }
}

impl fmt::Debug for OrgInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrgInfo")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"<redacted>")
            .field("org_name", &self.org_name)
            .field("username", &self.username)
            .finish()
    }
}

/// 已认证会话，建立后不可变
#[derive(Clone)]
pub struct Session {
    base_url: String,
    token: String,
    established_at: DateTime<Utc>,
}

impl Session {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            established_at: Utc::now(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }
}

impl From<&OrgInfo> for Session {
    fn from(info: &OrgInfo) -> Self {
        Session::new(&info.instance_url, &info.access_token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("established_at", &self.established_at)
            .finish()
    }
}
