//! Strategy-ordered topological sort
//!
//! Kahn's algorithm where the next task is picked from the eligible set by
//! the strategy's comparator. [`EligibleQueue::Resort`] re-sorts the whole
//! eligible set every iteration and is the reference behavior;
//! [`EligibleQueue::Heap`] keeps the set in a binary heap under the same
//! comparator and must produce the identical order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::str::FromStr;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::graph::DependencyGraph;
use super::strategy::Strategy;
use super::task::TaskDescriptor;

/// How the eligible set is maintained between picks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibleQueue {
    /// Full re-sort of the eligible set on every iteration
    #[default]
    Resort,
    /// Binary heap keyed by the same comparator
    Heap,
}

impl EligibleQueue {
    pub fn as_str(&self) -> &'static str {
        match self {
            EligibleQueue::Resort => "resort",
            EligibleQueue::Heap => "heap",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown queue '{0}' (expected resort or heap)")]
pub struct UnknownQueue(pub String);

impl FromStr for EligibleQueue {
    type Err = UnknownQueue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resort" => Ok(EligibleQueue::Resort),
            "heap" => Ok(EligibleQueue::Heap),
            other => Err(UnknownQueue(other.to_string())),
        }
    }
}

/// Orders every task in `graph`, dependencies first
///
/// Assumes the graph is acyclic. On a cyclic graph the tasks on or behind a
/// cycle are never eligible and are missing from the result.
pub fn topological_order<'a>(
    graph: &DependencyGraph<'a>,
    strategy: Strategy,
    queue: EligibleQueue,
) -> Vec<&'a str> {
    match queue {
        EligibleQueue::Resort => resort_order(graph, strategy),
        EligibleQueue::Heap => heap_order(graph, strategy),
    }
}

fn resort_order<'a>(graph: &DependencyGraph<'a>, strategy: Strategy) -> Vec<&'a str> {
    let g = graph.inner();
    let mut in_degree = graph.in_degrees();
    let mut eligible: Vec<NodeIndex> = g
        .node_indices()
        .filter(|idx| in_degree[idx.index()] == 0)
        .collect();
    let mut order = Vec::with_capacity(g.node_count());

    while !eligible.is_empty() {
        eligible.sort_by(|a, b| strategy.compare(graph.task(*a), graph.task(*b)));
        let current = eligible.remove(0);
        order.push(graph.task(current).title.as_str());

        for dependent in g.neighbors(current) {
            let degree = &mut in_degree[dependent.index()];
            *degree -= 1;
            if *degree == 0 {
                eligible.push(dependent);
            }
        }
    }

    order
}

/// Heap entry ordered by the strategy comparator
struct Ranked<'a> {
    task: &'a TaskDescriptor,
    idx: NodeIndex,
    strategy: Strategy,
}

impl PartialEq for Ranked<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked<'_> {}

impl PartialOrd for Ranked<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.strategy.compare(self.task, other.task)
    }
}

fn heap_order<'a>(graph: &DependencyGraph<'a>, strategy: Strategy) -> Vec<&'a str> {
    let g = graph.inner();
    let mut in_degree = graph.in_degrees();
    let rank = |idx: NodeIndex| {
        Reverse(Ranked {
            task: graph.task(idx),
            idx,
            strategy,
        })
    };

    let mut eligible: BinaryHeap<Reverse<Ranked<'a>>> = g
        .node_indices()
        .filter(|idx| in_degree[idx.index()] == 0)
        .map(rank)
        .collect();
    let mut order = Vec::with_capacity(g.node_count());

    while let Some(Reverse(current)) = eligible.pop() {
        order.push(current.task.title.as_str());

        for dependent in g.neighbors(current.idx) {
            let degree = &mut in_degree[dependent.index()];
            *degree -= 1;
            if *degree == 0 {
                eligible.push(rank(dependent));
            }
        }
    }

    order
}
