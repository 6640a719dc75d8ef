//! Configuration for the jsondb binary
//!
//! Read from `config.toml` in the platform config directory
//! (`~/.config/jsondb/config.toml` on Linux) or from an explicit path.
//! Command-line flags override every field.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::output::OutputFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Record format used by the binary
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum CodecKind {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Database directory
    pub root: Option<PathBuf>,

    /// Record format
    pub codec: CodecKind,

    /// Default output format
    pub output: OutputFormat,
}

impl Config {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "jsondb", "jsondb")
    }

    /// Returns the default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads configuration from the default location, if present
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Database directory: configured root, else the platform data directory
    pub fn root_or_default(&self) -> PathBuf {
        self.root
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join("db")))
            .unwrap_or_else(|| PathBuf::from("jsondb"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert!(config.root.is_none());
        assert_eq!(config.codec, CodecKind::Json);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn parse_config() {
        let toml = r#"
root = "/var/lib/fish"
codec = "yaml"
output = "json"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.root, Some(PathBuf::from("/var/lib/fish")));
        assert_eq!(config.codec, CodecKind::Yaml);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.root_or_default(), PathBuf::from("/var/lib/fish"));
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: Config = toml::from_str("codec = \"yaml\"").unwrap();

        assert!(config.root.is_none());
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "output = \"json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn load_from_invalid_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "codec = \"xml\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }
}
