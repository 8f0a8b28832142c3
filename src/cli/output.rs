//! Output formatting for CLI commands

use serde::{Deserialize, Serialize};

use crate::domain::{FailureKind, OrderingError};
use crate::storage::FormatPreference;

/// Output format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<FormatPreference> for OutputFormat {
    fn from(pref: FormatPreference) -> Self {
        match pref {
            FormatPreference::Text => OutputFormat::Text,
            FormatPreference::Json => OutputFormat::Json,
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Reports an ordering failure
    ///
    /// Text mode prints nothing here; the error reaches the user through
    /// `main`. JSON mode prints a machine-readable failure object on stdout.
    pub fn failure(&self, err: &OrderingError) {
        self.failure_body(err.kind(), &err.to_string(), err.cycle());
    }

    /// Reports a request document that could not be read as tasks
    pub fn unreadable_request(&self, err: &anyhow::Error) {
        self.failure_body(FailureKind::InvalidInput, &format!("{:#}", err), None);
    }

    fn failure_body(&self, kind: FailureKind, error: &str, cycle: Option<&[String]>) {
        if self.format != OutputFormat::Json {
            return;
        }

        let mut body = serde_json::json!({
            "success": false,
            "kind": kind.as_str(),
            "error": error,
        });
        if let Some(cycle) = cycle {
            body["cycle"] = serde_json::json!(cycle);
        }
        println!("{}", body);
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                // Callers normally render text themselves; this is the fallback
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
