//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Installer configuration.
    pub installer: InstallerConfig,
    /// Sample data configuration.
    pub sample: SampleConfig,
}

/// Installer process configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// PHP binary used to run `install.php`.
    pub php_binary: String,
    /// Installer timeout in seconds.
    pub timeout: u64,
}

/// Sample data configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// SQL dump file name inside the sample directory.
    pub dump_file: String,
    /// Media directory name inside the sample directory.
    pub media_dir: String,
    /// Statement delimiter.
    pub delimiter: char,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            php_binary: "php".to_string(),
            timeout: 300,
        }
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            dump_file: "magento_sample_data.sql".to_string(),
            media_dir: "media".to_string(),
            delimiter: crate::core::splitter::DEFAULT_DELIMITER,
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("magento_installer")
}

/// Parse configuration from TOML, falling back to defaults on error.
pub fn parse_config(content: &str) -> Config {
    match toml::from_str(content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring invalid config: {}", e);
            Config::default()
        }
    }
}

/// Load configuration from file.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    if config_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&config_path) {
            return parse_config(&content);
        }
    }

    Config::default()
}
