//! Configuration handling for ordo
//!
//! Configuration is read from the first of: an explicit path (`--config` or
//! `ORDO_CONFIG`), `.ordo.toml` in the current directory or any parent, and
//! `~/.config/ordo/config.toml` (global). Missing files mean defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{EligibleQueue, EngineOptions, Strategy};

/// File name looked up in the current directory and its parents
pub const PROJECT_CONFIG_FILE: &str = ".ordo.toml";

/// Default cap on tasks per request
pub const DEFAULT_MAX_TASKS: usize = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format used when the command line does not pick one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatPreference {
    #[default]
    Text,
    Json,
}

/// Engine and output defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Strategy used when neither the command line nor the request names one
    pub default_strategy: Strategy,

    /// Eligible-set implementation
    pub queue: EligibleQueue,

    /// Maximum tasks per request (0 disables the cap)
    pub max_tasks: usize,

    /// Output format when `--format` is not given
    pub default_format: FormatPreference,

    /// Where this configuration was loaded from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_strategy: Strategy::DepsDueSjf,
            queue: EligibleQueue::Resort,
            max_tasks: DEFAULT_MAX_TASKS,
            default_format: FormatPreference::Text,
            source: None,
        }
    }
}

impl Config {
    /// Loads configuration, preferring `explicit` when given
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            return Self::from_file(path);
        }

        let candidates = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::find_project_config(&cwd))
            .into_iter()
            .chain(Self::global_config_path());

        for path in candidates {
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Reads and parses a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Returns the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "ordo", "ordo").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Finds `.ordo.toml` in `start` or the nearest parent that has one
    pub fn find_project_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Engine options derived from this configuration
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            queue: self.queue,
            max_tasks: (self.max_tasks > 0).then_some(self.max_tasks),
        }
    }

    /// Writes the configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.default_strategy, Strategy::DepsDueSjf);
        assert_eq!(config.queue, EligibleQueue::Resort);
        assert_eq!(config.engine_options().max_tasks, Some(DEFAULT_MAX_TASKS));
        assert_eq!(config.default_format, FormatPreference::Text);
    }

    #[test]
    fn parse_config() {
        let toml = r#"
default_strategy = "DepsOnly"
queue = "heap"
max_tasks = 50
default_format = "json"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.default_strategy, Strategy::DepsOnly);
        assert_eq!(config.queue, EligibleQueue::Heap);
        assert_eq!(config.max_tasks, 50);
        assert_eq!(config.default_format, FormatPreference::Json);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: Config = toml::from_str(r#"default_strategy = "deps-due-fifo""#).unwrap();
        assert_eq!(config.default_strategy, Strategy::DepsDueFifo);
        assert_eq!(config.max_tasks, DEFAULT_MAX_TASKS);
    }

    #[test]
    fn zero_disables_cap() {
        let config = Config {
            max_tasks: 0,
            ..Config::default()
        };
        assert_eq!(config.engine_options().max_tasks, None);
    }

    #[test]
    fn rejects_unknown_strategy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, r#"default_strategy = "Fastest""#).unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }

    #[test]
    fn find_project_config_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "max_tasks = 7\n").unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let found = Config::find_project_config(&sub_dir).unwrap();
        assert_eq!(found, dir.path().join(PROJECT_CONFIG_FILE));
        assert_eq!(Config::from_file(&found).unwrap().max_tasks, 7);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            default_strategy: Strategy::DepsDueFifo,
            queue: EligibleQueue::Heap,
            ..Config::default()
        };

        config.save(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.default_strategy, Strategy::DepsDueFifo);
        assert_eq!(loaded.queue, EligibleQueue::Heap);
        assert_eq!(loaded.source, Some(path));
    }
}
