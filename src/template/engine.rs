// ABOUTME: Transform engine that walks a template tree against a source tree
// ABOUTME: Produces output shaped like the template, delegating string leaves to the binding evaluator

use serde_json::{Map, Value};
use tracing::debug;

use super::binding;
use super::document::TemplateDocument;
use super::error::Result;
use super::node::TemplateNode;

/// Binds templates from one document. Holds no state besides the document,
/// so a single engine can serve any number of binds.
#[derive(Debug, Clone, Copy)]
pub struct TemplateEngine<'a> {
    document: &'a TemplateDocument,
}

impl<'a> TemplateEngine<'a> {
    pub fn new(document: &'a TemplateDocument) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &'a TemplateDocument {
        self.document
    }

    /// Bind `source` into the template registered under `name`.
    pub fn bind(&self, source: &Value, name: &str) -> Result<Value> {
        let template = self.document.lookup(name)?;
        debug!("Binding template '{}'", name);
        self.transform(template, source)
    }

    /// Recursively resolve a template node against `source`.
    pub fn transform(&self, node: &TemplateNode, source: &Value) -> Result<Value> {
        match node {
            TemplateNode::Leaf(raw) => binding::evaluate(raw, source, self),
            TemplateNode::Object(children) => {
                let mut target = Map::new();
                for (key, child) in children {
                    target.insert(key.clone(), self.transform(child, source)?);
                }
                Ok(Value::Object(target))
            }
            // Every variant is bound against the same source, so the output
            // has as many elements as the template list.
            TemplateNode::Variants(variants) => variants
                .iter()
                .map(|variant| self.transform(variant, source))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            TemplateNode::Literal(value) => Ok(value.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateError;
    use serde_json::json;

    fn document(template: Value) -> TemplateDocument {
        TemplateDocument::from_value(template).unwrap()
    }

    #[test]
    fn test_binding_free_template_passes_through() {
        let template = json!({
            "title": "Static",
            "count": 3,
            "ratio": 0.5,
            "enabled": false,
            "missing": null,
            "nested": { "label": "inner", "tags": [ "a", "b" ] },
            "escaped": "\\{not a binding\\}"
        });
        let doc = document(json!({ "template": template.clone() }));
        let engine = TemplateEngine::new(&doc);

        let result = engine.bind(&json!({ "anything": [1, 2, 3] }), "template").unwrap();

        let mut expected = template;
        expected["escaped"] = json!("{not a binding}");
        assert_eq!(result, expected);
    }

    #[test]
    fn test_output_keeps_template_key_order() {
        let doc = document(json!({
            "template": { "zeta": "{=a}", "alpha": "{b}", "mid": 1 }
        }));
        let engine = TemplateEngine::new(&doc);

        let result = engine.bind(&json!({ "b": "x", "a": 1 }), "template").unwrap();

        let keys: Vec<&str> = result
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_variant_list_binds_each_element_against_same_source() {
        let doc = document(json!({
            "template": {
                "cards": [
                    { "kind": "title", "text": "{name}" },
                    { "kind": "age", "value": "{=age}" }
                ]
            }
        }));
        let engine = TemplateEngine::new(&doc);

        let source = json!({ "name": "Ada", "age": 36, "unused": [1, 2, 3, 4, 5] });
        let result = engine.bind(&source, "template").unwrap();

        assert_eq!(
            result,
            json!({
                "cards": [
                    { "kind": "title", "text": "Ada" },
                    { "kind": "age", "value": 36 }
                ]
            })
        );
    }

    #[test]
    fn test_bind_unknown_root_name() {
        let doc = document(json!({ "template": {} }));
        let engine = TemplateEngine::new(&doc);

        let result = engine.bind(&json!({}), "other");
        assert!(matches!(result, Err(TemplateError::UnknownTemplate(name)) if name == "other"));
    }

    #[test]
    fn test_error_aborts_whole_bind() {
        let doc = document(json!({
            "template": { "ok": "{a}", "bad": "{missing}", "later": "{a}" }
        }));
        let engine = TemplateEngine::new(&doc);

        let result = engine.bind(&json!({ "a": 1 }), "template");
        assert!(matches!(
            result,
            Err(TemplateError::BindingResolution { .. })
        ));
    }
}
