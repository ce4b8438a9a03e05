// ABOUTME: Main library module for json-templates
// ABOUTME: Exports the template binding engine and the command line application

pub mod cli;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use template::{TemplateDocument, TemplateEngine, TemplateError, TemplateNode};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
