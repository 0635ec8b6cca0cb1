//! 字段渲染

use serde_json::Value;
use std::fmt::Write;

use crate::models::description::FieldDescriptor;

/// 把字段元数据格式化为文本，不能有副作用
pub trait FieldRenderer: Send + Sync {
    fn render(&self, field: &FieldDescriptor) -> String;
}

/// 纯文本渲染：首行为名称和类型，随后是标签和按键排序的其余属性
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFieldRenderer;

impl FieldRenderer for TextFieldRenderer {
    fn render(&self, field: &FieldDescriptor) -> String {
        let mut out = format!("{} ({})\n", field.name, field.field_type);
        if let Some(label) = &field.label {
            let _ = writeln!(out, "  label: {}", label);
        }
        let mut attributes: Vec<_> = field.attributes.iter().collect();
        attributes.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in attributes {
            let _ = writeln!(out, "  {}: {}", key, display_value(value));
        }
        out
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".into(),
        other => other.to_string(),
    }
}
