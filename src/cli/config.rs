// ABOUTME: Configuration management for the json-templates command line tool
// ABOUTME: Handles loading configuration from YAML files and merging environment overrides

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::template::TemplateDocument;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_template")]
    pub default_template: String,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_template() -> String {
    TemplateDocument::ROOT.to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_template: default_template(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("json-templates.yaml"),
            PathBuf::from("json-templates.yml"),
            PathBuf::from(".json-templates.yaml"),
            PathBuf::from(".json-templates.yml"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".json-templates").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        // Return default path (may not exist)
        PathBuf::from("json-templates.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var("JSON_TEMPLATES_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("JSON_TEMPLATES_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(pretty) = std::env::var("JSON_TEMPLATES_PRETTY") {
            self.output.pretty = pretty.parse()?;
        }
        if let Ok(name) = std::env::var("JSON_TEMPLATES_DEFAULT_TEMPLATE") {
            self.default_template = name;
        }

        Ok(())
    }
}
