// ABOUTME: Template binding module for json-templates
// ABOUTME: Provides template documents, the transform engine and the binding mini-language

pub mod binding;
pub mod document;
pub mod engine;
pub mod error;
pub mod format;
pub mod node;
pub mod query;
pub mod scanner;

pub use document::TemplateDocument;
pub use engine::TemplateEngine;
pub use error::{Result, TemplateError};
pub use node::TemplateNode;
