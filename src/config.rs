//! Project metadata and template-search configuration
//!
//! Loaded from an optional `stencil.toml` at the project root. Every
//! field has a default, so a project with no config file still gets the
//! stock behavior.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default config filename looked up at the project root
pub const CONFIG_FILENAME: &str = "stencil.toml";

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Project metadata fed to the `PROJECTNAME` / `COMPANY` symbols
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub name: Option<String>,
    pub company: Option<String>,
}

/// Where to look for templates and which new files to process
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Subdirectory probed in each ancestor of the new file
    pub dir: String,
    /// Template filenames tried in order inside that subdirectory
    pub filenames: Vec<String>,
    /// File extensions the creation hook processes
    pub extensions: Vec<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: "ScriptTemplates".to_string(),
            filenames: vec!["Template.rs.txt".to_string(), "Template.txt".to_string()],
            extensions: vec!["rs".to_string()],
        }
    }
}

impl TemplateConfig {
    /// Whether the creation hook should process a file with this path
    pub fn watches(&self, path: &Path) -> bool {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self.extensions.iter().any(|watched| watched == ext),
            None => false,
        }
    }
}

/// Top-level configuration, mirroring the `stencil.toml` shape
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectInfo,
    pub templates: TemplateConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load `stencil.toml` from the project root, or defaults if absent
    pub fn discover(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILENAME);
        if path.is_file() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }
}
