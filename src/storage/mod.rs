//! # Storage Layer
//!
//! File formats read and written by the CLI.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Order requests | JSON, YAML or JSONL | any path, or stdin |
//! | Config | TOML | `.ordo.toml` (nearest parent) or `~/.config/ordo/config.toml` |
//!
//! ## Key Types
//!
//! - [`OrderRequest`] - Task list plus optional strategy
//! - [`Config`] - Engine and output defaults

mod config;
mod request;

pub use config::{Config, ConfigError, FormatPreference, DEFAULT_MAX_TASKS, PROJECT_CONFIG_FILE};
pub use request::{OrderRequest, RequestError, RequestFormat};
