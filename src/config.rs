//! Configuration handling for the designer

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Document file used when nothing else is configured
pub const DEFAULT_DOCUMENT_PATH: &str = "form-config.json";

/// User configuration for the designer
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DesignerConfig {
    /// Where Save writes and startup reads the form document
    pub document_path: Option<String>,
    /// Start new forms with the "Name" and "Address" fields
    pub seed_starter_fields: Option<bool>,
    /// Also copy the document to the clipboard on Save
    pub copy_on_save: Option<bool>,
}

impl DesignerConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "form-designer", "form-designer")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file location
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("form-designer.log"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: DesignerConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn document_path(&self) -> PathBuf {
        PathBuf::from(
            self.document_path
                .as_deref()
                .unwrap_or(DEFAULT_DOCUMENT_PATH),
        )
    }

    pub fn seed_starter_fields(&self) -> bool {
        self.seed_starter_fields.unwrap_or(true)
    }

    pub fn copy_on_save(&self) -> bool {
        self.copy_on_save.unwrap_or(false)
    }
}
