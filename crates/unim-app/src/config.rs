//! Configuration management for unim-checker
//!
//! Config stored at: ~/.config/unim-checker/config.json

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use unim_domain::service::PAGE_SIZE;
use unim_types::{ConfigError, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanned for tariff workbooks (.xlsx)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Path of the published dataset document
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Rows revealed per pagination step
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data").join("db.json")
}

fn default_page_size() -> usize {
    PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            db_path: default_db_path(),
            output_format: OutputFormat::default(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("unim-checker");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  data_dir:      {}", self.data_dir.display())?;
        writeln!(f, "  db_path:       {}", self.db_path.display())?;
        writeln!(f, "  output_format: {}", self.output_format)?;
        write!(f, "  page_size:     {}", self.page_size)
    }
}
