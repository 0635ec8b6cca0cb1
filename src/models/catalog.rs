//! 目录模型
//!
//! 全局 describe 返回的 sObject 类型列表，同时也是磁盘快照的内容。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// sObject 在各缓存层中的稳定标识（即 `urls.sobject` 路径）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 该对象的 describe 路径
    pub fn describe_path(&self) -> String {
        format!("{}/describe", self.0.trim_end_matches('/'))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// 目录条目的资源链接
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryUrls {
    pub sobject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub describe: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// 目录条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub custom: bool,
    pub urls: EntryUrls,
    /// 其余属性，原样写入快照
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl CatalogEntry {
    pub fn new(name: &str, sobject_url: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            custom: name.ends_with("__c"),
            urls: EntryUrls {
                sobject: sobject_url.to_string(),
                describe: None,
                other: Map::new(),
            },
            attributes: Map::new(),
        }
    }

    pub fn resource_id(&self) -> ResourceId {
        ResourceId::new(self.urls.sobject.clone())
    }
}

/// 目录校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogViolation {
    EmptyName { index: usize },
    MissingResource { name: String },
    DuplicateName { name: String },
}

impl fmt::Display for CatalogViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogViolation::EmptyName { index } => write!(f, "entry #{} has an empty name", index),
            CatalogViolation::MissingResource { name } => {
                write!(f, "entry '{}' has no sobject url", name)
            }
            CatalogViolation::DuplicateName { name } => {
                write!(f, "entry '{}' appears more than once", name)
            }
        }
    }
}

/// 有序目录，名称唯一
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// 构建目录，拒绝名称为空、缺少链接或重名的条目
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogViolation> {
        let mut seen = HashSet::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(CatalogViolation::EmptyName { index });
            }
            if entry.urls.sobject.trim().is_empty() {
                return Err(CatalogViolation::MissingResource {
                    name: entry.name.clone(),
                });
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(CatalogViolation::DuplicateName {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<CatalogEntry>::deserialize(deserializer)?;
        Catalog::from_entries(entries).map_err(serde::de::Error::custom)
    }
}

/// 全局 describe 响应
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalDescribeResponse {
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub max_batch_size: Option<u64>,
    pub sobjects: Catalog,
}
