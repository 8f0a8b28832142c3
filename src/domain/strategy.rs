//! Tie-break strategies
//!
//! A strategy decides which of several simultaneously eligible tasks goes
//! next. Every comparator ends on the title, so two distinct tasks never
//! compare equal.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::task::TaskDescriptor;

#[derive(Debug, Error, PartialEq)]
#[error("Unknown strategy '{0}' (expected DepsDueSjf, DepsDueFifo or DepsOnly)")]
pub struct UnknownStrategy(pub String);

/// Tie-break policy applied among eligible tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Due date, then shortest estimate, then title
    #[default]
    #[serde(alias = "deps-due-sjf")]
    DepsDueSjf,

    /// Due date, then title
    #[serde(alias = "deps-due-fifo")]
    DepsDueFifo,

    /// Title only
    #[serde(alias = "deps-only")]
    DepsOnly,
}

impl Strategy {
    /// All strategies in declaration order
    pub const ALL: [Strategy; 3] = [Strategy::DepsDueSjf, Strategy::DepsDueFifo, Strategy::DepsOnly];

    /// Name reported back to callers as `strategyUsed`
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::DepsDueSjf => "DepsDueSjf",
            Strategy::DepsDueFifo => "DepsDueFifo",
            Strategy::DepsOnly => "DepsOnly",
        }
    }

    /// Human-readable list of the tie-break keys, in priority order
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Strategy::DepsDueSjf => &["due date", "estimated hours", "title"],
            Strategy::DepsDueFifo => &["due date", "title"],
            Strategy::DepsOnly => &["title"],
        }
    }

    /// Compares two eligible tasks; `Less` means `a` goes first
    pub fn compare(&self, a: &TaskDescriptor, b: &TaskDescriptor) -> Ordering {
        match self {
            Strategy::DepsDueSjf => a
                .due_key()
                .cmp(&b.due_key())
                .then_with(|| a.effort_key().total_cmp(&b.effort_key()))
                .then_with(|| a.title.cmp(&b.title)),
            Strategy::DepsDueFifo => a
                .due_key()
                .cmp(&b.due_key())
                .then_with(|| a.title.cmp(&b.title)),
            Strategy::DepsOnly => a.title.cmp(&b.title),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DepsDueSjf" | "deps-due-sjf" => Ok(Strategy::DepsDueSjf),
            "DepsDueFifo" | "deps-due-fifo" => Ok(Strategy::DepsDueFifo),
            "DepsOnly" | "deps-only" => Ok(Strategy::DepsOnly),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}
