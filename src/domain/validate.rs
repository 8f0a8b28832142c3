//! Request-shape validation
//!
//! These checks look at the task list only, never at graph topology. They
//! run before the graph is built so that later stages can assume every
//! referenced title exists.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::task::{TaskDescriptor, MAX_TITLE_LEN};

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Request contains no tasks")]
    NoTasks,

    #[error("Too many tasks: {count} (limit is {max})")]
    TooManyTasks { count: usize, max: usize },

    #[error("Task at position {0} has an empty title")]
    EmptyTitle(usize),

    #[error("Task title exceeds {max} characters: '{title}'")]
    TitleTooLong { title: String, max: usize },

    #[error("Duplicate task titles found: {}", .0.join(", "))]
    DuplicateTitles(Vec<String>),

    #[error("Task '{task}' has an invalid effort estimate: {hours}")]
    InvalidEffort { task: String, hours: f64 },

    #[error("Task '{0}' cannot depend on itself")]
    SelfDependency(String),

    #[error("Task '{task}' depends on unknown task '{dependency}'")]
    UnknownDependency { task: String, dependency: String },
}

/// Validates a task list, failing on the first class of problem found
pub fn validate_tasks(tasks: &[TaskDescriptor], max_tasks: Option<usize>) -> Result<(), InputError> {
    if let Some(max) = max_tasks {
        if tasks.len() > max {
            return Err(InputError::TooManyTasks {
                count: tasks.len(),
                max,
            });
        }
    }

    for (position, task) in tasks.iter().enumerate() {
        if task.title.is_empty() {
            return Err(InputError::EmptyTitle(position));
        }
        if task.title.chars().count() > MAX_TITLE_LEN {
            return Err(InputError::TitleTooLong {
                title: task.title.clone(),
                max: MAX_TITLE_LEN,
            });
        }
    }

    let duplicates = duplicate_titles(tasks);
    if !duplicates.is_empty() {
        return Err(InputError::DuplicateTitles(duplicates));
    }

    for task in tasks {
        if let Some(hours) = task.estimated_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(InputError::InvalidEffort {
                    task: task.title.clone(),
                    hours,
                });
            }
        }
    }

    let titles: HashSet<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    for task in tasks {
        for dependency in &task.dependencies {
            if dependency == &task.title {
                return Err(InputError::SelfDependency(task.title.clone()));
            }
            if !titles.contains(dependency.as_str()) {
                return Err(InputError::UnknownDependency {
                    task: task.title.clone(),
                    dependency: dependency.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Titles that appear more than once, each reported once in first-seen order
fn duplicate_titles(tasks: &[TaskDescriptor]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::with_capacity(tasks.len());
    let mut order = Vec::new();

    for task in tasks {
        let count = counts.entry(task.title.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(task.title.clone());
        }
    }

    order
}
