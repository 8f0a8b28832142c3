//! Order request documents
//!
//! A request is a task list plus an optional strategy, stored as JSON, YAML,
//! or JSON Lines (one task object per line, no strategy).

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{InputError, OrderingError, Strategy, TaskDescriptor};

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to parse {format} request: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("Failed to parse task at line {line}: {message}")]
    Line { line: usize, message: String },
}

/// Encoding of a request document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Json,
    Yaml,
    JsonLines,
}

impl RequestFormat {
    /// Picks a format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(RequestFormat::Json),
            "yaml" | "yml" => Some(RequestFormat::Yaml),
            "jsonl" | "ndjson" => Some(RequestFormat::JsonLines),
            _ => None,
        }
    }
}

/// A parsed ordering request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub tasks: Vec<TaskDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
}

impl OrderRequest {
    /// Loads a request from a file, or from stdin when `source` is `None` or `-`
    pub fn load(source: Option<&Path>) -> Result<Self> {
        match source {
            Some(path) if path != Path::new("-") => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read request: {}", path.display()))?;
                Self::parse(&content, RequestFormat::from_path(path))
                    .with_context(|| format!("Invalid request file: {}", path.display()))
            }
            _ => {
                let mut content = String::new();
                std::io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read request from stdin")?;
                Self::parse(&content, None).context("Invalid request on stdin")
            }
        }
    }

    /// Parses a request document; without a format, JSON is tried before YAML
    pub fn parse(content: &str, format: Option<RequestFormat>) -> Result<Self, RequestError> {
        match format {
            Some(RequestFormat::Json) => Self::from_json(content),
            Some(RequestFormat::Yaml) => Self::from_yaml(content),
            Some(RequestFormat::JsonLines) => Self::from_json_lines(content),
            None => Self::from_json(content).or_else(|json_err| {
                Self::from_yaml(content).map_err(|_| json_err)
            }),
        }
    }

    fn from_json(content: &str) -> Result<Self, RequestError> {
        serde_json::from_str(content).map_err(|e| RequestError::Parse {
            format: "JSON",
            message: e.to_string(),
        })
    }

    fn from_yaml(content: &str) -> Result<Self, RequestError> {
        serde_yaml::from_str(content).map_err(|e| RequestError::Parse {
            format: "YAML",
            message: e.to_string(),
        })
    }

    fn from_json_lines(content: &str) -> Result<Self, RequestError> {
        let mut tasks = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let task: TaskDescriptor =
                serde_json::from_str(line).map_err(|e| RequestError::Line {
                    line: line_num + 1,
                    message: e.to_string(),
                })?;
            tasks.push(task);
        }

        Ok(Self {
            tasks,
            strategy: None,
        })
    }

    /// Rejects requests that carry no tasks at all
    pub fn ensure_not_empty(&self) -> Result<(), OrderingError> {
        if self.tasks.is_empty() {
            return Err(InputError::NoTasks.into());
        }
        Ok(())
    }

    /// Strategy to use: the override, else the request's own, else `fallback`
    pub fn effective_strategy(&self, cli: Option<Strategy>, fallback: Strategy) -> Strategy {
        cli.or(self.strategy).unwrap_or(fallback)
    }
}
