//! Configuration loading from TOML files

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for panelform
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub portal: PortalConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub dir: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("scraped_json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("aep_preprocessed_wide_2000_2022.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub source_link: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            source_link: "https://africa-energy-portal.org/database".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./panelform.toml (current directory)
    /// 2. ~/.config/panelform/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("panelform.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "panelform") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.input.dir, PathBuf::from("scraped_json"));
        assert_eq!(
            config.output.path,
            PathBuf::from("aep_preprocessed_wide_2000_2022.csv")
        );
        assert!(config.portal.source_link.contains("africa-energy-portal"));
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[input]
dir = "/tmp/scraped"

[output]
path = "/tmp/out.csv"

[portal]
source_link = "https://example.org/db"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.input.dir, PathBuf::from("/tmp/scraped"));
        assert_eq!(config.output.path, PathBuf::from("/tmp/out.csv"));
        assert_eq!(config.portal.source_link, "https://example.org/db");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let toml = r#"
[input]
dir = "elsewhere"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.input.dir, PathBuf::from("elsewhere"));
        assert_eq!(
            config.output.path,
            PathBuf::from("aep_preprocessed_wide_2000_2022.csv")
        );
    }
}
