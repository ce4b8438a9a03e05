// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides fixture loading and temporary file environments shared by test files

#![allow(dead_code)]

use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

use json_templates::TemplateDocument;

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> Value {
    let content = std::fs::read_to_string(fixture_path(name)).unwrap();
    serde_json::from_str(&content).unwrap()
}

pub fn fixture_document() -> TemplateDocument {
    TemplateDocument::from_file(fixture_path("template.json")).unwrap()
}

/// Build a one-property document `{ "template": { "prop": leaf } }`
pub fn single_property_template(leaf: &str) -> TemplateDocument {
    TemplateDocument::from_value(serde_json::json!({ "template": { "prop": leaf } })).unwrap()
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub async fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).await.unwrap();
        path
    }

    pub async fn write_json(&self, name: &str, value: &Value) -> PathBuf {
        let content = serde_json::to_string_pretty(value).unwrap();
        self.write_file(name, &content).await
    }

    pub async fn read_json(&self, name: &str) -> Value {
        let content = fs::read_to_string(self.temp_dir.path().join(name))
            .await
            .unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
