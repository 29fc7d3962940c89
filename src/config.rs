//! Linker configuration
//!
//! Loaded from YAML:
//!
//! ```yaml
//! href_prefix: "records/"
//! lore_dir: ./lore
//! ```
//!
//! Every field is optional; an empty file gives the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Prepended to the target `name_id` of every emitted link
    pub href_prefix: String,

    /// Directory of lore YAML files used by the CLI
    pub lore_dir: Option<PathBuf>,
}

impl LinkerConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "Linker configuration loaded");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}
