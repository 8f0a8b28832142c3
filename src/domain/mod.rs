//! Ordering engine
//!
//! Contains the core ordering logic without any I/O concerns.

mod task;
mod strategy;
mod validate;
mod graph;
mod cycle;
mod sort;
mod engine;

pub use task::{TaskDescriptor, MAX_TITLE_LEN};
pub use strategy::{Strategy, UnknownStrategy};
pub use validate::{validate_tasks, InputError};
pub use graph::{DependencyGraph, GraphError};
pub use cycle::{find_cycle, has_cycle};
pub use sort::{topological_order, EligibleQueue, UnknownQueue};
pub use engine::{
    check_tasks, compute_order, compute_order_with, EngineOptions, FailureKind, OrderResult,
    OrderingError,
};
