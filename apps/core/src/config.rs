use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adapters::DEFAULT_HISTORY_MAX_RESULTS;
use crate::catalog::DEFAULT_FEATURED_AGENT_LIMIT;
use crate::selector::DEFAULT_WINDOW_BASE;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
            Self::Invalid(error) => write!(f, "invalid config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

pub fn stable_app_data_dir() -> PathBuf {
    std::env::temp_dir().join("palette")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub result_window_base: usize,
    pub history_max_results: u32,
    pub featured_agent_limit: usize,
    pub store_db_path: PathBuf,
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = stable_app_data_dir();
        Self {
            result_window_base: DEFAULT_WINDOW_BASE,
            history_max_results: DEFAULT_HISTORY_MAX_RESULTS,
            featured_agent_limit: DEFAULT_FEATURED_AGENT_LIMIT,
            store_db_path: base.join("palette.sqlite3"),
            config_path: base.join("config.toml"),
        }
    }
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.result_window_base < 10 || cfg.result_window_base > 1000 {
        return Err(ConfigError::Invalid("result_window_base out of range".into()));
    }

    if cfg.history_max_results == 0 || cfg.history_max_results > 50_000 {
        return Err(ConfigError::Invalid("history_max_results out of range".into()));
    }

    if cfg.featured_agent_limit > 20 {
        return Err(ConfigError::Invalid("featured_agent_limit out of range".into()));
    }

    if cfg.store_db_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("store_db_path is required".into()));
    }

    if cfg.config_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("config_path is required".into()));
    }

    Ok(())
}

/// Loads the config from `path` (default path when `None`); a missing
/// file yields defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => cfg.config_path.clone(),
    };

    if !path.exists() {
        cfg.config_path = path;
        return Ok(cfg);
    }

    let raw = std::fs::read_to_string(&path)?;
    let mut cfg: Config =
        toml::from_str(&raw).map_err(|error| ConfigError::Parse(error.to_string()))?;
    cfg.config_path = path;
    validate(&cfg)?;
    Ok(cfg)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    validate(cfg)?;
    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let raw =
        toml::to_string_pretty(cfg).map_err(|error| ConfigError::Parse(error.to_string()))?;
    std::fs::write(&cfg.config_path, raw)?;
    Ok(())
}
