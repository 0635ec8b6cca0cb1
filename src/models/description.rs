//! 对象描述模型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// 字段描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// describe 返回的其余字段属性
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl FieldDescriptor {
    pub fn new(name: &str, field_type: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
            label: None,
            attributes: Map::new(),
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }
}

/// 单个 sObject 的字段结构
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Description {
    pub fields: Vec<FieldDescriptor>,
}

impl Description {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// 检查字段是否可作为叶子节点，返回第一个问题
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for (index, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(format!("field #{} has an empty name", index));
            }
            if field.field_type.trim().is_empty() {
                return Err(format!("field '{}' has an empty type", field.name));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(format!("field '{}' appears more than once", field.name));
            }
        }
        Ok(())
    }
}
