//! Global almanac configuration.

use std::path::{Path, PathBuf};

use ::config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{AlmanacError, AlmanacResult};

static DEFAULT_STORAGE_PATH: &str = "~/.local/share/almanac/storage.json";
static DEFAULT_EXPORT_DIR: &str = ".";

fn default_storage_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_PATH)
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

/// Configuration at ~/.config/almanac/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AlmanacConfig {
    /// Where the key-value storage file lives
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Directory receiving monthly exports
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        AlmanacConfig {
            storage_path: default_storage_path(),
            export_dir: default_export_dir(),
        }
    }
}

impl AlmanacConfig {
    pub fn config_path() -> AlmanacResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AlmanacError::Config("Could not determine config directory".into()))?
            .join("almanac");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config from its default location, writing a commented
    /// template there first if it does not exist yet.
    pub fn load() -> AlmanacResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> AlmanacResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| AlmanacError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AlmanacError::Config(e.to_string()))
    }

    /// Storage path with `~` expanded.
    pub fn storage_path(&self) -> PathBuf {
        expand(&self.storage_path)
    }

    /// Export directory with `~` expanded.
    pub fn export_dir(&self) -> PathBuf {
        expand(&self.export_dir)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AlmanacResult<()> {
        let contents = format!(
            "\
# almanac configuration

# Where appointments and the displayed month are stored:
# storage_path = \"{}\"

# Where `almanac export` writes its files:
# export_dir = \"{}\"
",
            DEFAULT_STORAGE_PATH, DEFAULT_EXPORT_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AlmanacError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AlmanacError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn to_toml(&self) -> AlmanacResult<String> {
        toml::to_string_pretty(self).map_err(|e| AlmanacError::Config(e.to_string()))
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
