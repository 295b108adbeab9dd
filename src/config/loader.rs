use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::CommandFile;
use crate::error::RegistryError;
use crate::registry::Registry;

/// Errors that can occur when loading a command file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read command file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse command file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl CommandFile {
    /// Returns the path to the default command file.
    ///
    /// Uses `~/.config/chatmatch/commands.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("chatmatch").join("commands.toml")
    }

    /// Loads the default command file.
    ///
    /// A missing file yields an empty command file with default settings.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No command file, using defaults");
            return Ok(CommandFile::default());
        }

        Self::load_from(&path)
    }

    /// Loads and parses a command file from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parses a command file from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Builds a registry from the settings and registers every command.
    pub fn into_registry(self) -> Result<Registry, ConfigError> {
        let mut registry = Registry::new(self.settings)?;
        if !self.commands.is_empty() {
            registry.add(self.commands)?;
        }
        Ok(registry)
    }
}
