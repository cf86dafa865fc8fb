//! User preferences

use crate::error::{ExplorerError, Result};
use crate::export::EXPORT_FILE_NAME;
use crate::preview::DEFAULT_PDF_HEIGHT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Preferences read from `~/.config/nsi-explorer/config.json`.
///
/// The file is optional and never written by the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// syntect theme used to highlight code previews
    pub theme: String,
    /// Height of the embedded PDF viewer
    pub pdf_height: u32,
    /// File name used when exporting the listing
    pub export_file_name: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            pdf_height: DEFAULT_PDF_HEIGHT,
            export_file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl UserConfig {
    /// Get the config file path (~/.config/nsi-explorer/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nsi-explorer").join("config.json"))
    }

    /// Load config from the default location, or defaults if there is none
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            ExplorerError::ConfigError("Could not determine config directory".to_string())
        })?;

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            ExplorerError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            ExplorerError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.export_file_name.trim().is_empty() {
            return Err(ExplorerError::ConfigError(
                "export_file_name cannot be empty".to_string(),
            ));
        }

        if self.pdf_height == 0 {
            return Err(ExplorerError::ConfigError(
                "pdf_height must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
