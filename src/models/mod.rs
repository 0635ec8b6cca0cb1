//! 数据模型模块
//!
//! 目录条目、对象描述、会话和树节点。

pub mod catalog;
pub mod description;
pub mod node;
pub mod session;

pub use catalog::{Catalog, CatalogEntry, CatalogViolation, EntryUrls, GlobalDescribeResponse, ResourceId};
pub use description::{Description, FieldDescriptor};
pub use node::{FieldNode, Node, NodeAddress, ObjectNode};
pub use session::{OrgInfo, Session};
