//! 树节点模型
//!
//! 节点是每次层级查询时重新构建的视图。对象节点包装目录条目，
//! 字段节点包装字段描述以及所属对象的资源 ID。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::catalog::{CatalogEntry, ResourceId};
use crate::models::description::FieldDescriptor;

/// 节点地址的 URI 前缀
pub const NODE_SCHEME: &str = "sobject://";

/// 根节点，每个目录条目一个
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    entry: CatalogEntry,
}

impl ObjectNode {
    pub fn new(entry: CatalogEntry) -> Self {
        Self { entry }
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn is_custom(&self) -> bool {
        self.entry.custom
    }

    pub fn entry(&self) -> &CatalogEntry {
        &self.entry
    }

    pub fn resource_id(&self) -> ResourceId {
        self.entry.resource_id()
    }

    pub fn address(&self) -> NodeAddress {
        NodeAddress::object(self.resource_id())
    }
}

/// 叶子节点，每个字段一个
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    field: FieldDescriptor,
    parent: ResourceId,
}

impl FieldNode {
    pub fn new(field: FieldDescriptor, parent: ResourceId) -> Self {
        Self { field, parent }
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }

    pub fn field_type(&self) -> &str {
        &self.field.field_type
    }

    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    pub fn parent(&self) -> &ResourceId {
        &self.parent
    }

    pub fn address(&self) -> NodeAddress {
        NodeAddress::field(self.parent.clone(), &self.field.name)
    }
}

/// 树节点
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Object(ObjectNode),
    Field(FieldNode),
}

impl Node {
    pub fn label(&self) -> &str {
        match self {
            Node::Object(node) => node.name(),
            Node::Field(node) => node.name(),
        }
    }

    pub fn is_expandable(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    pub fn address(&self) -> NodeAddress {
        match self {
            Node::Object(node) => node.address(),
            Node::Field(node) => node.address(),
        }
    }
}

impl From<ObjectNode> for Node {
    fn from(node: ObjectNode) -> Self {
        Node::Object(node)
    }
}

impl From<FieldNode> for Node {
    fn from(node: FieldNode) -> Self {
        Node::Field(node)
    }
}

/// 节点地址，无需目录即可解析出资源 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAddress {
    pub resource: ResourceId,
    pub field: Option<String>,
}

impl NodeAddress {
    pub fn object(resource: ResourceId) -> Self {
        Self {
            resource,
            field: None,
        }
    }

    pub fn field(resource: ResourceId, field: &str) -> Self {
        Self {
            resource,
            field: Some(field.to_string()),
        }
    }

    /// 解析 `sobject://<resource>[#<field>]`
    pub fn parse(s: &str) -> Option<Self> {
        let rest = s.strip_prefix(NODE_SCHEME)?;
        let (resource, field) = match rest.rsplit_once('#') {
            Some((resource, field)) if !field.is_empty() => (resource, Some(field.to_string())),
            Some(_) => return None,
            None => (rest, None),
        };
        if resource.is_empty() {
            return None;
        }
        Some(Self {
            resource: ResourceId::new(resource),
            field,
        })
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", NODE_SCHEME, self.resource)?;
        if let Some(field) = &self.field {
            write!(f, "#{}", field)?;
        }
        Ok(())
    }
}
