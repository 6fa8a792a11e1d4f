use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{error::OwmError, language::Language, unit::Unit};

/// Environment variable consulted first when resolving the API key.
pub const API_KEY_ENV: &str = "OWM_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// unit = "metric"
/// language = "EN"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub unit: Option<String>,
    pub language: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from an explicit path; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "current-weather", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Store unit and language in their canonical forms.
    pub fn set_defaults(&mut self, unit: Unit, language: Language) {
        self.unit = Some(unit.as_api_str().to_string());
        self.language = Some(language.code().to_string());
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// Configured unit, if any. A stale or hand-edited value is reported, not ignored.
    pub fn unit(&self) -> Result<Option<Unit>, OwmError> {
        self.unit.as_deref().map(Unit::try_from).transpose()
    }

    pub fn language(&self) -> Result<Option<Language>, OwmError> {
        self.language.as_deref().map(Language::try_from).transpose()
    }
}

/// Resolve the API key from the environment, then the config file.
pub fn resolve_api_key() -> Result<String, OwmError> {
    let from_env = std::env::var(API_KEY_ENV).ok();
    let path = Config::config_file_path().map_err(config_error)?;
    resolve_api_key_at(from_env.as_deref(), &path)
}

/// Like [`resolve_api_key`], reading the config file at `path`.
///
/// The file is only read when `env` holds no usable key; a file that cannot
/// be read or parsed is an error, not an absent key.
pub fn resolve_api_key_at(env: Option<&str>, path: &Path) -> Result<String, OwmError> {
    if let Ok(key) = resolve_api_key_from(env, &Config::default()) {
        return Ok(key);
    }
    let config = Config::load_from(path).map_err(config_error)?;
    resolve_api_key_from(None, &config)
}

fn config_error(err: anyhow::Error) -> OwmError {
    OwmError::Config(format!("{err:#}"))
}

/// Pick the first non-blank key among the environment value and the config.
pub fn resolve_api_key_from(env: Option<&str>, config: &Config) -> Result<String, OwmError> {
    env.into_iter()
        .chain(config.api_key.as_deref())
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or(OwmError::MissingCredential)
}
