//! 层级构建服务
//!
//! 把目录呈现为两层树：每个 sObject 一个根节点，每个字段一个叶子节点。
//! 对象只在展开时才发起 describe。树查询从不失败，失败时返回空列表并标记为降级；
//! `refresh` 和渲染会把错误返回给调用方。

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{ExplorerError, Result};
use crate::models::catalog::Catalog;
use crate::models::node::{FieldNode, Node, NodeAddress, ObjectNode};
use crate::services::catalog_cache::CatalogCache;
use crate::services::description_cache::DescriptionCache;
use crate::services::render::FieldRenderer;

/// 子节点列表，因失败而为空时带上原因
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Children {
    pub nodes: Vec<Node>,
    pub degraded: Option<String>,
}

impl Children {
    fn complete(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            degraded: None,
        }
    }

    fn degraded(error: &ExplorerError) -> Self {
        Self {
            nodes: Vec::new(),
            degraded: Some(error.to_string()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

pub struct SObjectExplorer {
    catalog: Arc<CatalogCache>,
    descriptions: Arc<DescriptionCache>,
    renderer: Arc<dyn FieldRenderer>,
}

impl SObjectExplorer {
    pub fn new(
        catalog: Arc<CatalogCache>,
        descriptions: Arc<DescriptionCache>,
        renderer: Arc<dyn FieldRenderer>,
    ) -> Self {
        Self {
            catalog,
            descriptions,
            renderer,
        }
    }

    pub fn catalog_cache(&self) -> &Arc<CatalogCache> {
        &self.catalog
    }

    pub fn description_cache(&self) -> &Arc<DescriptionCache> {
        &self.descriptions
    }

    /// `parent` 为 `None` 时返回根节点，对象节点返回字段，字段节点没有子节点
    pub async fn children(&self, parent: Option<&Node>) -> Children {
        match parent {
            None => match self.try_list_roots().await {
                Ok(roots) => Children::complete(roots.into_iter().map(Node::from).collect()),
                Err(e) => {
                    warn!("Failed to list sObjects: {}", e);
                    Children::degraded(&e)
                }
            },
            Some(Node::Object(object)) => match self.try_expand(object).await {
                Ok(fields) => Children::complete(fields.into_iter().map(Node::from).collect()),
                Err(e) => {
                    warn!("Failed to describe {}: {}", object.name(), e);
                    Children::degraded(&e)
                }
            },
            Some(Node::Field(_)) => Children::default(),
        }
    }

    /// 每个目录条目一个节点，保持目录顺序。失败时为空
    pub async fn list_roots(&self) -> Vec<ObjectNode> {
        self.try_list_roots().await.unwrap_or_else(|e| {
            warn!("Failed to list sObjects: {}", e);
            Vec::new()
        })
    }

    /// 对象的字段节点。失败时为空
    pub async fn expand(&self, node: &ObjectNode) -> Vec<FieldNode> {
        self.try_expand(node).await.unwrap_or_else(|e| {
            warn!("Failed to describe {}: {}", node.name(), e);
            Vec::new()
        })
    }

    /// 通过描述缓存渲染单个字段
    pub async fn render_leaf(&self, node: &FieldNode) -> Result<String> {
        self.render_field(&NodeAddress::field(node.parent().clone(), node.name()))
            .await
    }

    /// 直接按地址字符串渲染叶子节点
    pub async fn render_address(&self, address: &str) -> Result<String> {
        let address = NodeAddress::parse(address)
            .ok_or_else(|| ExplorerError::NotFound(format!("not an sObject address: {}", address)))?;
        self.render_field(&address).await
    }

    /// 强制从远程重新获取目录，错误向上传递
    pub async fn refresh(&self) -> Result<Arc<Catalog>> {
        let catalog = self.catalog.refresh().await?;
        info!("Catalog refreshed: {} sObjects", catalog.len());
        Ok(catalog)
    }

    /// 获取目录，错误向上传递
    pub async fn catalog(&self) -> Result<Arc<Catalog>> {
        self.catalog.get_catalog().await
    }

    async fn try_list_roots(&self) -> Result<Vec<ObjectNode>> {
        let catalog = self.catalog.get_catalog().await?;
        Ok(catalog
            .entries()
            .iter()
            .cloned()
            .map(ObjectNode::new)
            .collect())
    }

    async fn try_expand(&self, node: &ObjectNode) -> Result<Vec<FieldNode>> {
        let parent = node.resource_id();
        let description = self.descriptions.get_description(&parent).await?;
        Ok(description
            .fields
            .iter()
            .cloned()
            .map(|field| FieldNode::new(field, parent.clone()))
            .collect())
    }

    async fn render_field(&self, address: &NodeAddress) -> Result<String> {
        let name = address.field.as_deref().ok_or_else(|| {
            ExplorerError::NotFound(format!("{} does not address a field", address))
        })?;
        let description = self.descriptions.get_description(&address.resource).await?;
        let field = description.field(name).ok_or_else(|| {
            ExplorerError::NotFound(format!("field {} not found on {}", name, address.resource))
        })?;
        Ok(self.renderer.render(field))
    }
}
