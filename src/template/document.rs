// ABOUTME: Template document holding the root template and its named sub-templates
// ABOUTME: Loads documents from JSON or YAML and exposes the bind entry points

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use super::engine::TemplateEngine;
use super::error::{Result, TemplateError};
use super::node::TemplateNode;

/// A loaded set of templates. The entry named [`TemplateDocument::ROOT`] is
/// always present; any sibling entries can be referenced from `array()`
/// bindings.
///
/// Documents are immutable once loaded and can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDocument {
    templates: IndexMap<String, TemplateNode>,
}

impl TemplateDocument {
    pub const ROOT: &'static str = "template";

    /// Build a document from an already parsed JSON tree
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(entries) = value else {
            return Err(TemplateError::InvalidTemplate(
                "the document must be a JSON object".to_string(),
            ));
        };
        if !entries.contains_key(Self::ROOT) {
            return Err(TemplateError::InvalidTemplate(format!(
                "There is no root property called '{}' defined.",
                Self::ROOT
            )));
        }

        let templates: IndexMap<String, TemplateNode> = entries
            .into_iter()
            .map(|(name, node)| (name, TemplateNode::from(node)))
            .collect();
        debug!("Loaded template document with {} templates", templates.len());

        Ok(Self { templates })
    }

    /// Parse a document from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Parse a document from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(value)
    }

    /// Load a document from a `.json`, `.yaml` or `.yml` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if is_yaml_path(path) {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    pub fn lookup(&self, name: &str) -> Result<&TemplateNode> {
        self.templates
            .get(name)
            .ok_or_else(|| TemplateError::UnknownTemplate(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Template names in document order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn engine(&self) -> TemplateEngine<'_> {
        TemplateEngine::new(self)
    }

    /// Bind `source` into the root template
    pub fn bind(&self, source: &Value) -> Result<Value> {
        self.bind_named(source, Self::ROOT)
    }

    /// Bind `source` into the template registered under `name`
    pub fn bind_named(&self, source: &Value, name: &str) -> Result<Value> {
        self.engine().bind(source, name)
    }

    /// Bind any serializable value by converting it to a JSON tree first
    pub fn bind_serialize<S: Serialize + ?Sized>(&self, source: &S) -> Result<Value> {
        let tree = serde_json::to_value(source)?;
        self.bind(&tree)
    }

    /// Bind a serializable value and deserialize the output into `T`
    pub fn bind_as<T, S>(&self, source: &S) -> Result<T>
    where
        T: DeserializeOwned,
        S: Serialize + ?Sized,
    {
        let output = self.bind_serialize(source)?;
        Ok(serde_json::from_value(output)?)
    }
}

impl FromStr for TemplateDocument {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}

impl TryFrom<Value> for TemplateDocument {
    type Error = TemplateError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

/// Whether a path names a YAML file rather than JSON
pub fn is_yaml_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_document_requires_root_template() {
        let result = TemplateDocument::from_json(r#"{ "other": { "a": "{a}" } }"#);
        assert!(matches!(result, Err(TemplateError::InvalidTemplate(_))));
    }

    #[test]
    fn test_document_must_be_object() {
        let result = TemplateDocument::from_value(json!(["template"]));
        assert!(matches!(result, Err(TemplateError::InvalidTemplate(_))));
    }

    #[test]
    fn test_document_rejects_bad_json() {
        let result = TemplateDocument::from_json("{ not json");
        assert!(matches!(result, Err(TemplateError::JsonError(_))));
    }

    #[test]
    fn test_lookup_and_names() {
        let doc: TemplateDocument = r#"{
            "template": { "items": "{array(list, row)}" },
            "row": { "v": "{=v}" },
            "unused": "{x}"
        }"#
        .parse()
        .unwrap();

        let names: Vec<&str> = doc.names().collect();
        assert_eq!(names, vec!["template", "row", "unused"]);
        assert!(doc.contains("row"));
        assert!(doc.lookup("row").is_ok());
        assert!(matches!(
            doc.lookup("missing"),
            Err(TemplateError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_sub_templates_are_not_validated_at_load() {
        let doc = TemplateDocument::from_value(json!({
            "template": { "items": "{array(list, notDefined)}", "bad": "{format(x)}" }
        }));
        assert!(doc.is_ok());
    }

    #[test]
    fn test_bind_named() {
        let doc = TemplateDocument::from_value(json!({
            "template": { "a": "{a}" },
            "alt": { "b": "{=b}" }
        }))
        .unwrap();

        let result = doc.bind_named(&json!({ "b": [1] }), "alt").unwrap();
        assert_eq!(result, json!({ "b": [1] }));
    }

    #[test]
    fn test_from_yaml_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("card.yaml");
        fs::write(
            &path,
            "template:\n  title: \"Hello {name}\"\n  size: 3\n",
        )
        .unwrap();

        let doc = TemplateDocument::from_file(&path).unwrap();
        let result = doc.bind(&json!({ "name": "yaml" })).unwrap();
        assert_eq!(result, json!({ "title": "Hello yaml", "size": 3 }));
    }

    #[test]
    fn test_from_missing_file() {
        let result = TemplateDocument::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(TemplateError::IoError(_))));
    }
}
