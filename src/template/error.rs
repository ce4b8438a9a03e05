// ABOUTME: Error types for template loading and binding operations
// ABOUTME: Defines the failures a bind can surface, all of which abort the whole bind

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Invalid template document: {0}")]
    InvalidTemplate(String),

    #[error("There is no template named '{0}'")]
    UnknownTemplate(String),

    #[error("Missing 2nd argument to format in '{binding}'. Example: {{format(path, D)}}")]
    MissingFormatArgument { binding: String },

    #[error("Structural mismatch at '{path}': expected {expected}, found {found}")]
    StructuralMismatch {
        path: String,
        expected: &'static str,
        found: String,
    },

    #[error("Unable to resolve binding '{binding}': {reason}")]
    BindingResolution { binding: String, reason: String },

    #[error("Malformed binding '{binding}': {reason}")]
    InvalidBinding { binding: String, reason: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid format specifier '{spec}': {reason}")]
    InvalidFormat { spec: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
