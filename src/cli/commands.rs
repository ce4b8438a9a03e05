// ABOUTME: Command implementations for the json-templates CLI
// ABOUTME: Handles loading template and data files, binding them and writing the output

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use super::config::Config;
use crate::template::document::is_yaml_path;
use crate::template::TemplateDocument;

/// Read a JSON or YAML file into a JSON tree, choosing the parser by extension
pub async fn load_tree(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))?;

    let tree = if is_yaml_path(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML in '{}'", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON in '{}'", path.display()))?
    };
    Ok(tree)
}

/// Load a template document from disk
pub async fn load_document(path: &Path) -> Result<TemplateDocument> {
    let tree = load_tree(path).await?;
    TemplateDocument::from_value(tree)
        .with_context(|| format!("Invalid template document '{}'", path.display()))
}

/// Bind a data file into a template and write the result
pub async fn bind_template(
    template_path: PathBuf,
    data_path: PathBuf,
    name: Option<String>,
    output: Option<PathBuf>,
    compact: bool,
    config: &Config,
) -> Result<()> {
    info!(
        "Binding '{}' into '{}'",
        data_path.display(),
        template_path.display()
    );

    let document = load_document(&template_path).await?;
    let source = load_tree(&data_path).await?;

    let name = name.unwrap_or_else(|| config.default_template.clone());
    debug!("Using template '{}'", name);

    let result = document
        .bind_named(&source, &name)
        .with_context(|| format!("Failed to bind template '{}'", name))?;

    let rendered = render_output(&result, config.output.pretty && !compact)?;

    match output {
        Some(path) => {
            fs::write(&path, format!("{}\n", rendered))
                .await
                .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
            info!("Output written to: {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Print the names of the templates in a document
pub async fn list_templates(template_path: PathBuf, _config: &Config) -> Result<()> {
    let document = load_document(&template_path).await?;

    for name in document.names() {
        if name == TemplateDocument::ROOT {
            println!("{} (root)", name);
        } else {
            println!("{}", name);
        }
    }

    Ok(())
}

fn render_output(value: &Value, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}
