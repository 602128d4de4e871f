//! Configuration management for the Zeppelin CLI
//!
//! Stores conversion defaults in ~/.config/zeppelin/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use zeppelin::{validate_images_dir, ConverterOptions, DEFAULT_IMAGES_DIR};

const CONFIG_DIR: &str = "zeppelin";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
    #[serde(default = "default_table_row_limit")]
    pub table_row_limit: usize,
}

fn default_images_dir() -> String {
    DEFAULT_IMAGES_DIR.to_string()
}

fn default_table_row_limit() -> usize {
    ConverterOptions::default().table_row_limit
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_user: None,
            default_language: None,
            images_dir: default_images_dir(),
            table_row_limit: default_table_row_limit(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from the default location, or fall back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Set a value by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_user" => self.default_user = Some(value.to_string()),
            "default_language" => self.default_language = Some(value.to_string()),
            "images_dir" => {
                validate_images_dir(value)
                    .with_context(|| format!("Invalid images_dir: {}", value))?;
                self.images_dir = value.to_string();
            }
            "table_row_limit" => {
                self.table_row_limit = value
                    .parse()
                    .with_context(|| format!("Invalid row limit: {}", value))?;
            }
            _ => anyhow::bail!("Unknown config key '{}'", key),
        }
        Ok(())
    }

    /// Clear an optional value by key
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "default_user" => self.default_user = None,
            "default_language" => self.default_language = None,
            "images_dir" => self.images_dir = default_images_dir(),
            "table_row_limit" => self.table_row_limit = default_table_row_limit(),
            _ => anyhow::bail!("Unknown config key '{}'", key),
        }
        Ok(())
    }

    /// Build converter options; explicit flags win over config values
    pub fn converter_options(
        &self,
        user: Option<String>,
        language: Option<String>,
        row_limit: Option<usize>,
    ) -> ConverterOptions {
        let mut options = ConverterOptions::default()
            .with_table_row_limit(row_limit.unwrap_or(self.table_row_limit));

        if let Some(user) = user.or_else(|| self.default_user.clone()) {
            options = options.with_user(user);
        }
        if let Some(language) = language.or_else(|| self.default_language.clone()) {
            options = options.with_language(language);
        }

        options
    }
}
