//! Cycle detection over a dependency graph
//!
//! Both traversals are iterative depth-first walks with an explicit stack
//! and a mark per node, so input depth never grows the call stack. A node
//! is `InProgress` exactly while it sits on the stack; meeting such a node
//! again is a back edge.

use petgraph::graph::NodeIndex;

use super::graph::DependencyGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Returns true if any dependency cycle exists
pub fn has_cycle(graph: &DependencyGraph<'_>) -> bool {
    let g = graph.inner();
    let mut marks = vec![Mark::Unvisited; g.node_count()];

    for start in g.node_indices() {
        if marks[start.index()] != Mark::Unvisited {
            continue;
        }

        marks[start.index()] = Mark::InProgress;
        let mut stack = vec![(start, g.neighbors(start))];

        while let Some((node, neighbors)) = stack.last_mut() {
            let node = *node;
            match neighbors.next() {
                Some(next) => match marks[next.index()] {
                    Mark::Unvisited => {
                        marks[next.index()] = Mark::InProgress;
                        stack.push((next, g.neighbors(next)));
                    }
                    Mark::InProgress => return true,
                    Mark::Done => {}
                },
                None => {
                    marks[node.index()] = Mark::Done;
                    stack.pop();
                }
            }
        }
    }

    false
}

/// Finds one dependency cycle and returns it as a closed path of titles
///
/// The path starts and ends with the same title and each consecutive pair
/// is a real edge (prerequisite, dependent). When several cycles exist,
/// which one is returned is unspecified.
pub fn find_cycle(graph: &DependencyGraph<'_>) -> Option<Vec<String>> {
    let g = graph.inner();
    let mut marks = vec![Mark::Unvisited; g.node_count()];
    let mut path: Vec<NodeIndex> = Vec::new();

    for start in g.node_indices() {
        if marks[start.index()] != Mark::Unvisited {
            continue;
        }

        marks[start.index()] = Mark::InProgress;
        path.push(start);
        let mut stack = vec![g.neighbors(start)];

        while let Some(neighbors) = stack.last_mut() {
            match neighbors.next() {
                Some(next) => match marks[next.index()] {
                    Mark::Unvisited => {
                        marks[next.index()] = Mark::InProgress;
                        path.push(next);
                        stack.push(g.neighbors(next));
                    }
                    Mark::InProgress => {
                        let begin = path.iter().position(|idx| *idx == next)?;
                        let mut cycle: Vec<String> = path[begin..]
                            .iter()
                            .map(|idx| graph.task(*idx).title.clone())
                            .collect();
                        cycle.push(graph.task(next).title.clone());
                        return Some(cycle);
                    }
                    Mark::Done => {}
                },
                None => {
                    if let Some(done) = path.pop() {
                        marks[done.index()] = Mark::Done;
                    }
                    stack.pop();
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskDescriptor;

    /// Asserts that `cycle` is closed and every step is a real edge
    fn assert_real_cycle(graph: &DependencyGraph<'_>, cycle: &[String]) {
        assert!(cycle.len() >= 3, "cycle too short: {:?}", cycle);
        assert_eq!(cycle.first(), cycle.last());
        for pair in cycle.windows(2) {
            assert!(
                graph.dependents(&pair[0]).contains(&pair[1].as_str()),
                "{} -> {} is not an edge",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn acyclic_graph_has_no_cycle() {
        let tasks = vec![
            TaskDescriptor::new("A"),
            TaskDescriptor::new("B").depends_on("A"),
            TaskDescriptor::new("C").depends_on("A").depends_on("B"),
        ];
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();

        assert!(!has_cycle(&graph));
        assert_eq!(find_cycle(&graph), None);
    }

    #[test]
    fn cross_edge_is_not_a_cycle() {
        // Diamond: D reached twice through B and C
        let tasks = vec![
            TaskDescriptor::new("A"),
            TaskDescriptor::new("B").depends_on("A"),
            TaskDescriptor::new("C").depends_on("A"),
            TaskDescriptor::new("D").depends_on("B").depends_on("C"),
        ];
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();
        assert!(!has_cycle(&graph));
    }

    #[test]
    fn three_node_cycle() {
        let tasks = vec![
            TaskDescriptor::new("A").depends_on("B"),
            TaskDescriptor::new("B").depends_on("C"),
            TaskDescriptor::new("C").depends_on("A"),
        ];
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();

        assert!(has_cycle(&graph));
        let cycle = find_cycle(&graph).unwrap();
        assert_real_cycle(&graph, &cycle);
        for title in ["A", "B", "C"] {
            assert!(cycle.iter().any(|t| t == title));
        }
    }

    #[test]
    fn two_node_cycle() {
        let tasks = vec![
            TaskDescriptor::new("X").depends_on("Y"),
            TaskDescriptor::new("Y").depends_on("X"),
        ];
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();

        let cycle = find_cycle(&graph).unwrap();
        assert_real_cycle(&graph, &cycle);
        assert_eq!(cycle.len(), 3);
    }

    #[test]
    fn cycle_behind_acyclic_prefix() {
        // Root feeds into a loop that is only reachable downstream
        let tasks = vec![
            TaskDescriptor::new("Root"),
            TaskDescriptor::new("P").depends_on("Root").depends_on("R"),
            TaskDescriptor::new("Q").depends_on("P"),
            TaskDescriptor::new("R").depends_on("Q"),
            TaskDescriptor::new("Tail").depends_on("R"),
        ];
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();

        assert!(has_cycle(&graph));
        let cycle = find_cycle(&graph).unwrap();
        assert_real_cycle(&graph, &cycle);
        assert!(!cycle.iter().any(|t| t == "Root" || t == "Tail"));
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let n = 100_000;
        let mut tasks = vec![TaskDescriptor::new("t0")];
        for i in 1..n {
            tasks.push(TaskDescriptor::new(format!("t{i}")).depends_on(format!("t{}", i - 1)));
        }
        {
            let graph = DependencyGraph::from_tasks(&tasks).unwrap();
            assert!(!has_cycle(&graph));
        }

        // Close the loop at the far end
        tasks[0] = TaskDescriptor::new("t0").depends_on(format!("t{}", n - 1));
        let graph = DependencyGraph::from_tasks(&tasks).unwrap();
        assert!(has_cycle(&graph));
        let cycle = find_cycle(&graph).unwrap();
        assert_eq!(cycle.len(), n + 1);
    }
}
