//! Ordering engine entry point
//!
//! Runs the pipeline validate -> build graph -> detect cycles -> sort. Each
//! call owns its graph, in-degree table and eligible set; nothing is shared
//! between calls.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::cycle::{find_cycle, has_cycle};
use super::graph::DependencyGraph;
use super::sort::{topological_order, EligibleQueue};
use super::strategy::Strategy;
use super::task::TaskDescriptor;
use super::validate::{validate_tasks, InputError};

/// Failure category surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    UnsatisfiableGraph,
    Internal,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidInput => "invalid_input",
            FailureKind::UnsatisfiableGraph => "unsatisfiable_graph",
            FailureKind::Internal => "internal_error",
        }
    }

    /// HTTP-style status a transport layer would answer with
    pub fn status_code(&self) -> u16 {
        match self {
            FailureKind::InvalidInput => 400,
            FailureKind::UnsatisfiableGraph => 422,
            FailureKind::Internal => 500,
        }
    }

    /// Process exit code used by the CLI
    pub fn exit_code(&self) -> u8 {
        match self {
            FailureKind::InvalidInput => 3,
            FailureKind::UnsatisfiableGraph => 4,
            FailureKind::Internal => 1,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum OrderingError {
    #[error("Invalid input: {0}")]
    InvalidInput(InputError),

    #[error("Circular dependency detected: {}", .cycle.join(" -> "))]
    UnsatisfiableGraph { cycle: Vec<String> },

    /// Detail is kept for logs; the message shown to callers stays generic
    #[error("An unexpected error occurred while computing the order")]
    Internal(String),
}

// No `#[from]`: the input error is part of the message, not a source
impl From<InputError> for OrderingError {
    fn from(err: InputError) -> Self {
        OrderingError::InvalidInput(err)
    }
}

impl OrderingError {
    pub fn kind(&self) -> FailureKind {
        match self {
            OrderingError::InvalidInput(_) => FailureKind::InvalidInput,
            OrderingError::UnsatisfiableGraph { .. } => FailureKind::UnsatisfiableGraph,
            OrderingError::Internal(_) => FailureKind::Internal,
        }
    }

    /// The offending cycle, if this is a cycle failure
    pub fn cycle(&self) -> Option<&[String]> {
        match self {
            OrderingError::UnsatisfiableGraph { cycle } => Some(cycle),
            _ => None,
        }
    }
}

/// Knobs that do not change which order is valid, only how it is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineOptions {
    pub queue: EligibleQueue,

    /// Reject requests with more tasks than this
    pub max_tasks: Option<usize>,
}

/// A computed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResult {
    /// Every input title exactly once, dependencies first
    pub recommended_order: Vec<String>,

    pub strategy_used: Strategy,
}

/// Computes the recommended order with default options
pub fn compute_order(
    tasks: &[TaskDescriptor],
    strategy: Strategy,
) -> Result<OrderResult, OrderingError> {
    compute_order_with(tasks, strategy, &EngineOptions::default())
}

/// Computes the recommended order
pub fn compute_order_with(
    tasks: &[TaskDescriptor],
    strategy: Strategy,
    options: &EngineOptions,
) -> Result<OrderResult, OrderingError> {
    debug!(tasks = tasks.len(), %strategy, queue = options.queue.as_str(), "computing order");

    let graph = check_tasks(tasks, options.max_tasks)?;

    let order = topological_order(&graph, strategy, options.queue);
    if order.len() != tasks.len() {
        return Err(internal(format!(
            "sort placed {} of {} tasks",
            order.len(),
            tasks.len()
        )));
    }

    debug!(placed = order.len(), "order computed");
    Ok(OrderResult {
        recommended_order: order.into_iter().map(String::from).collect(),
        strategy_used: strategy,
    })
}

/// Validates the tasks and proves the graph acyclic, without sorting
///
/// Returns the built graph so callers can inspect it.
pub fn check_tasks(
    tasks: &[TaskDescriptor],
    max_tasks: Option<usize>,
) -> Result<DependencyGraph<'_>, OrderingError> {
    if let Err(e) = validate_tasks(tasks, max_tasks) {
        debug!(error = %e, "rejected task list");
        return Err(e.into());
    }

    let graph = DependencyGraph::from_tasks(tasks)
        .map_err(|e| internal(format!("graph construction failed after validation: {e}")))?;
    debug!(nodes = graph.len(), edges = graph.edge_count(), "dependency graph built");

    if has_cycle(&graph) {
        let cycle = find_cycle(&graph)
            .ok_or_else(|| internal("cycle detected but no path reconstructed".to_string()))?;
        debug!(cycle = %cycle.join(" -> "), "dependency cycle");
        return Err(OrderingError::UnsatisfiableGraph { cycle });
    }

    Ok(graph)
}

fn internal(detail: String) -> OrderingError {
    tracing::error!(%detail, "internal ordering failure");
    OrderingError::Internal(detail)
}
