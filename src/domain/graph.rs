//! Dependency graph for an ordering request
//!
//! Edges point from a prerequisite to the tasks that depend on it, so the
//! outgoing neighbors of a node are its dependents. Uses petgraph for
//! storage; node weights borrow the request's descriptors.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;
use thiserror::Error;

use super::task::TaskDescriptor;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Self-dependency not allowed: {0}")]
    SelfDependency(String),
}

/// Per-request dependency graph keyed by task title
#[derive(Debug, Default)]
pub struct DependencyGraph<'a> {
    /// The underlying directed graph (prerequisite -> dependent)
    graph: DiGraph<&'a TaskDescriptor, ()>,

    /// Map from title to node index
    node_map: HashMap<&'a str, NodeIndex>,
}

impl<'a> DependencyGraph<'a> {
    /// Creates an empty dependency graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds a graph from a task list
    ///
    /// Every task becomes a node in input order, even with no edges. Repeated
    /// dependency entries collapse into a single edge.
    pub fn from_tasks(tasks: &'a [TaskDescriptor]) -> Result<Self, GraphError> {
        let mut graph = Self {
            graph: DiGraph::with_capacity(tasks.len(), tasks.len()),
            node_map: HashMap::with_capacity(tasks.len()),
        };

        // First pass: add all nodes
        for task in tasks {
            graph.add_task(task);
        }

        // Second pass: add all edges
        for task in tasks {
            for dependency in &task.dependencies {
                graph.add_dependency(&task.title, dependency)?;
            }
        }

        Ok(graph)
    }

    /// Adds a task to the graph; a title already present keeps its node
    pub fn add_task(&mut self, task: &'a TaskDescriptor) -> NodeIndex {
        if let Some(idx) = self.node_map.get(task.title.as_str()) {
            return *idx;
        }
        let idx = self.graph.add_node(task);
        self.node_map.insert(task.title.as_str(), idx);
        idx
    }

    /// Adds a dependency edge: `task` depends on `depends_on`
    ///
    /// The edge direction is: depends_on -> task
    pub fn add_dependency(&mut self, task: &str, depends_on: &str) -> Result<(), GraphError> {
        if task == depends_on {
            return Err(GraphError::SelfDependency(task.to_string()));
        }

        let task_idx = self
            .index_of(task)
            .ok_or_else(|| GraphError::TaskNotFound(task.to_string()))?;

        let dep_idx = self
            .index_of(depends_on)
            .ok_or_else(|| GraphError::TaskNotFound(depends_on.to_string()))?;

        self.graph.update_edge(dep_idx, task_idx, ());
        Ok(())
    }

    /// Returns the titles this task depends on, sorted
    pub fn dependencies(&self, title: &str) -> Vec<&'a str> {
        self.neighbor_titles(title, Direction::Incoming)
    }

    /// Returns the titles of tasks that depend on this one, sorted
    pub fn dependents(&self, title: &str) -> Vec<&'a str> {
        self.neighbor_titles(title, Direction::Outgoing)
    }

    fn neighbor_titles(&self, title: &str, direction: Direction) -> Vec<&'a str> {
        let Some(idx) = self.index_of(title) else {
            return vec![];
        };

        let mut titles: Vec<&'a str> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.task(n).title.as_str())
            .collect();
        titles.sort_unstable();
        titles
    }

    /// Number of unresolved dependencies per node, indexed by `NodeIndex::index`
    pub fn in_degrees(&self) -> Vec<usize> {
        self.graph
            .node_indices()
            .map(|idx| self.graph.neighbors_directed(idx, Direction::Incoming).count())
            .collect()
    }

    /// Returns true if the graph contains the title
    pub fn contains(&self, title: &str) -> bool {
        self.node_map.contains_key(title)
    }

    /// Returns the number of tasks in the graph
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the number of distinct dependency edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns all titles in insertion order
    pub fn titles(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.graph.node_weights().map(|&task| task.title.as_str())
    }

    pub(crate) fn index_of(&self, title: &str) -> Option<NodeIndex> {
        self.node_map.get(title).copied()
    }

    pub(crate) fn task(&self, idx: NodeIndex) -> &'a TaskDescriptor {
        self.graph[idx]
    }

    pub(crate) fn inner(&self) -> &DiGraph<&'a TaskDescriptor, ()> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<TaskDescriptor> {
        vec![
            TaskDescriptor::new("A"),
            TaskDescriptor::new("B").depends_on("A"),
            TaskDescriptor::new("C").depends_on("B"),
        ]
    }

    #[test]
    fn empty_graph() {
        let graph = DependencyGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
    }

    #[test]
    fn from_tasks_adds_every_title() {
        let tasks = vec![
            TaskDescriptor::new("Lonely"),
            TaskDescriptor::new("A"),
            TaskDescriptor::new("B").depends_on("A"),
        ];
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();

        assert_eq!(graph.len(), 3);
        assert!(graph.contains("Lonely"));
        assert!(graph.dependents("Lonely").is_empty());
        assert!(graph.dependencies("Lonely").is_empty());
        assert_eq!(graph.titles().collect::<Vec<_>>(), vec!["Lonely", "A", "B"]);
    }

    #[test]
    fn edges_point_to_dependents() {
        let tasks = chain();
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();

        assert_eq!(graph.dependents("A"), vec!["B"]);
        assert_eq!(graph.dependencies("B"), vec!["A"]);
        assert_eq!(graph.dependents("C"), Vec::<&str>::new());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn repeated_dependency_is_one_edge() {
        let tasks = vec![
            TaskDescriptor::new("A"),
            TaskDescriptor::new("B").depends_on("A").depends_on("A"),
        ];
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.in_degrees(), vec![0, 1]);
    }

    #[test]
    fn in_degrees_follow_insertion_order() {
        let tasks = vec![
            TaskDescriptor::new("D").depends_on("A").depends_on("B"),
            TaskDescriptor::new("A"),
            TaskDescriptor::new("B").depends_on("A"),
        ];
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();
        assert_eq!(graph.in_degrees(), vec![2, 0, 1]);
        assert_eq!(graph.dependents("A"), vec!["B", "D"]);
    }

    #[test]
    fn self_dependency_rejected() {
        let tasks = vec![TaskDescriptor::new("A").depends_on("A")];
        let result = DependencyGraph::from_tasks(&tasks);
        assert_eq!(result.unwrap_err(), GraphError::SelfDependency("A".to_string()));
    }

    #[test]
    fn unknown_task_returns_error() {
        let tasks = vec![TaskDescriptor::new("A").depends_on("Ghost")];
        let result = DependencyGraph::from_tasks(&tasks);
        assert_eq!(result.unwrap_err(), GraphError::TaskNotFound("Ghost".to_string()));
    }

    #[test]
    fn unknown_title_has_no_neighbors() {
        let tasks = chain();
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();
        assert!(!graph.contains("Z"));
        assert!(graph.dependents("Z").is_empty());
    }
}
