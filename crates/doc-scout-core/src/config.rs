use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

const PROJECT_CONFIG_FILE: &str = ".doc-scout.toml";
const USER_CONFIG_DIR: &str = "doc-scout";
const USER_CONFIG_FILE: &str = "config.toml";

/// Tool configuration, loaded from `.doc-scout.toml` at the project root
/// and/or `doc-scout/config.toml` under the user config directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Scanner-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanConfig {
    /// Directory names to skip in addition to the built-in skip set
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Directory names to remove from the built-in skip set
    #[serde(default)]
    pub include: Vec<String>,
}

impl Config {
    /// Load the project-level config. Returns `Ok(None)` when the file does
    /// not exist.
    pub fn load_project(project_root: &Path) -> Result<Option<Self>> {
        Self::load_file(&project_root.join(PROJECT_CONFIG_FILE))
    }

    /// Load the user-level config from the platform config directory.
    /// Returns `Ok(None)` when the directory or file does not exist.
    pub fn load_user() -> Result<Option<Self>> {
        match user_config_path() {
            Some(path) => Self::load_file(&path),
            None => Ok(None),
        }
    }

    /// Load the layered configuration for a project: user config first,
    /// project config merged on top.
    pub fn load_layered(project_root: &Path) -> Result<Self> {
        let mut config = Self::load_user()?.unwrap_or_default();
        if let Some(project) = Self::load_project(project_root)? {
            config.merge(project);
        }
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Merge another config into this one. List entries are appended,
    /// duplicates dropped.
    pub fn merge(&mut self, other: Config) {
        for dir in other.scan.exclude {
            if !self.scan.exclude.contains(&dir) {
                self.scan.exclude.push(dir);
            }
        }
        for dir in other.scan.include {
            if !self.scan.include.contains(&dir) {
                self.scan.include.push(dir);
            }
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
}
