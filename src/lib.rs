//! Ordo - dependency-aware task ordering
//!
//! Given named tasks with optional effort estimates, due dates and
//! dependencies, ordo produces one execution order that respects every
//! dependency, breaking ties with a selectable strategy.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{
    compute_order, compute_order_with, EligibleQueue, EngineOptions, OrderResult, OrderingError,
    Strategy, TaskDescriptor,
};
