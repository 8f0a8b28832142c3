//! Task descriptor model
//!
//! A descriptor is the engine's view of one task: a unique title, optional
//! tie-break keys and the titles it has to wait for. Descriptors are
//! immutable for the duration of an ordering request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum title length accepted by the validator (in characters)
pub const MAX_TITLE_LEN: usize = 200;

/// One task in an ordering request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDescriptor {
    /// Identity key, unique within a request (case-sensitive)
    pub title: String,

    /// Effort estimate in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,

    /// Calendar due date, no time component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Titles of tasks that must come before this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl TaskDescriptor {
    /// Creates a descriptor with no estimate, due date or dependencies
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            estimated_hours: None,
            due_date: None,
            dependencies: Vec::new(),
        }
    }

    /// Sets the effort estimate
    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the due date
    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Adds a dependency on another task
    pub fn depends_on(mut self, title: impl Into<String>) -> Self {
        self.dependencies.push(title.into());
        self
    }

    /// Due date used for ordering; a missing date sorts as the latest date
    pub fn due_key(&self) -> NaiveDate {
        self.due_date.unwrap_or(NaiveDate::MAX)
    }

    /// Effort used for ordering; a missing estimate sorts as the largest value
    ///
    /// Signed zeros are folded into `+0.0` so they compare equal.
    pub fn effort_key(&self) -> f64 {
        self.estimated_hours.map_or(f64::MAX, |hours| hours + 0.0)
    }

    /// Returns true if this task lists `title` as a dependency
    pub fn has_dependency(&self, title: &str) -> bool {
        self.dependencies.iter().any(|d| d == title)
    }
}
