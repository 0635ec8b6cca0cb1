//! 认证模块
//!
//! 获取当前 org 的实例地址和访问令牌：
//! - CLI（`force:org:display --json`）
//! - 配置中的固定凭据

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::config::config::{AuthConfig, AuthMode};
use crate::error::{ExplorerError, Result};
use crate::models::session::OrgInfo;

/// org 凭据来源
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrgInfoProvider: Send + Sync {
    /// 执行认证，失败时返回 `ExplorerError::Auth`
    async fn get_org_info(&self) -> Result<OrgInfo>;
}

/// 通过 Salesforce CLI 获取 org 信息
pub struct CliOrgInfoProvider {
    program: String,
    target_org: Option<String>,
}

#[derive(Deserialize)]
struct CliEnvelope {
    status: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Option<CliOrgResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliOrgResult {
    instance_url: Option<String>,
    access_token: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    alias: Option<String>,
}

impl CliOrgInfoProvider {
    pub fn new(program: &str, target_org: Option<String>) -> Self {
        Self {
            program: program.to_string(),
            target_org,
        }
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec!["force:org:display".to_string(), "--json".to_string()];
        if let Some(org) = &self.target_org {
            args.push("-u".to_string());
            args.push(org.clone());
        }
        args
    }

    /// 解析 `force:org:display` 的 `--json` 输出
    pub fn parse_output(stdout: &str) -> Result<OrgInfo> {
        let envelope: CliEnvelope = serde_json::from_str(stdout)
            .map_err(|e| ExplorerError::Auth(format!("unreadable org display output: {}", e)))?;

        if envelope.status != 0 {
            return Err(ExplorerError::Auth(
                envelope
                    .message
                    .unwrap_or_else(|| format!("org display returned status {}", envelope.status)),
            ));
        }

        let result = envelope
            .result
            .ok_or_else(|| ExplorerError::Auth("org display returned no result".into()))?;

        let instance_url = result
            .instance_url
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ExplorerError::Auth("org display has no instanceUrl".into()))?;
        let access_token = result
            .access_token
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ExplorerError::Auth("org display has no accessToken".into()))?;

        Ok(OrgInfo {
            instance_url,
            access_token,
            org_name: result.alias,
            username: result.username,
        })
    }
}

#[async_trait]
impl OrgInfoProvider for CliOrgInfoProvider {
    async fn get_org_info(&self) -> Result<OrgInfo> {
        tracing::debug!("Running {} force:org:display", self.program);

        let output = Command::new(&self.program)
            .args(self.args())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExplorerError::Auth(format!("failed to run {}: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() && stdout.trim().is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExplorerError::Auth(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Self::parse_output(&stdout)
    }
}

/// 固定凭据
pub struct StaticOrgInfoProvider {
    info: OrgInfo,
}

impl StaticOrgInfoProvider {
    pub fn new(info: OrgInfo) -> Self {
        Self { info }
    }
}

#[async_trait]
impl OrgInfoProvider for StaticOrgInfoProvider {
    async fn get_org_info(&self) -> Result<OrgInfo> {
        Ok(self.info.clone())
    }
}

/// 根据配置创建认证提供者
pub fn create_org_info_provider(config: &AuthConfig) -> Result<Box<dyn OrgInfoProvider>> {
    match config.mode {
        AuthMode::Cli => Ok(Box::new(CliOrgInfoProvider::new(
            &config.cli_program,
            config.target_org.clone(),
        ))),
        AuthMode::Static => {
            let instance_url = config
                .instance_url
                .as_deref()
                .ok_or_else(|| ExplorerError::Config("auth.instance_url is not set".into()))?;
            let access_token = config
                .access_token
                .as_deref()
                .ok_or_else(|| ExplorerError::Config("auth.access_token is not set".into()))?;
            Ok(Box::new(StaticOrgInfoProvider::new(OrgInfo::new(
                instance_url,
                access_token,
            ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_output() {
        let stdout = r#"{
            "status": 0,
            "result": {
                "id": "00D000000000001",
                "accessToken": "00D!abc",
                "instanceUrl": "https://acme.my.salesforce.com",
                "username": "admin@acme.com",
                "alias": "acme"
            }
        }"#;
        let info = CliOrgInfoProvider::parse_output(stdout).unwrap();
        assert_eq!(info.instance_url, "https://acme.my.salesforce.com");
        assert_eq!(info.access_token, "00D!abc");
        assert_eq!(info.display_name(), "acme");
    }

    #[test]
    fn test_parse_cli_error_status() {
        let stdout = r#"{"status": 1, "message": "No default org set"}"#;
        let err = CliOrgInfoProvider::parse_output(stdout).unwrap_err();
        assert!(matches!(err, ExplorerError::Auth(msg) if msg.contains("No default org")));
    }

    #[test]
    fn test_parse_cli_missing_token() {
        let stdout = r#"{"status": 0, "result": {"instanceUrl": "https://x"}}"#;
        assert!(matches!(
            CliOrgInfoProvider::parse_output(stdout),
            Err(ExplorerError::Auth(_))
        ));
    }

    #[test]
    fn test_cli_args_include_target_org() {
        let provider = CliOrgInfoProvider::new("sfdx", Some("acme".into()));
        assert_eq!(provider.args(), vec!["force:org:display", "--json", "-u", "acme"]);
    }

    #[tokio::test]
    async fn test_missing_cli_program_is_auth_error() {
        let provider = CliOrgInfoProvider::new("definitely-not-an-installed-cli", None);
        assert!(matches!(
            provider.get_org_info().await,
            Err(ExplorerError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn test_static_provider_from_config() {
        let mut config = AuthConfig::default();
        config.mode = AuthMode::Static;
        assert!(create_org_info_provider(&config).is_err());

        config.instance_url = Some("https://acme.my.salesforce.com".into());
        config.access_token = Some("token".into());
        let provider = create_org_info_provider(&config).unwrap();
        let info = provider.get_org_info().await.unwrap();
        assert_eq!(info.instance_url, "https://acme.my.salesforce.com");
    }
}
