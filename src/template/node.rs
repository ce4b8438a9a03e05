// ABOUTME: Typed representation of a loaded template tree
// ABOUTME: Separates binding leaves, nested objects, variant lists and passthrough literals

use indexmap::IndexMap;
use serde_json::Value;

/// A node of a template, converted once from JSON when the document is loaded.
///
/// Binding text in leaves is kept raw; it is only parsed when a bind reaches it.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// A string that may embed `{...}` bindings.
    Leaf(String),
    /// Keys in template order; the output object keeps the same order.
    Object(IndexMap<String, TemplateNode>),
    /// A list of templates, each applied to the same source as the parent.
    Variants(Vec<TemplateNode>),
    /// Numbers, booleans and null are copied unchanged.
    Literal(Value),
}

impl From<Value> for TemplateNode {
    fn from(value: Value) -> Self {
        match value {
            Value::String(raw) => TemplateNode::Leaf(raw),
            Value::Object(map) => TemplateNode::Object(
                map.into_iter()
                    .map(|(key, child)| (key, TemplateNode::from(child)))
                    .collect(),
            ),
            Value::Array(items) => {
                TemplateNode::Variants(items.into_iter().map(TemplateNode::from).collect())
            }
            other => TemplateNode::Literal(other),
        }
    }
}
