//! Inspection commands (graph, strategies)

use std::path::Path;

use anyhow::Result;

use super::order::load_request;
use super::output::Output;
use crate::domain::{
    find_cycle, has_cycle, validate_tasks, DependencyGraph, OrderingError, Strategy,
};
use crate::storage::Config;

/// Prints every task with its dependencies and dependents
///
/// Works on cyclic requests too, so the cycle can be inspected in context.
pub fn graph(output: &Output, config: &Config, file: Option<&Path>) -> Result<()> {
    let request = load_request(output, file)?;
    if let Err(e) = validate_tasks(&request.tasks, config.engine_options().max_tasks) {
        let err = OrderingError::from(e);
        output.failure(&err);
        return Err(err.into());
    }

    let graph = DependencyGraph::from_tasks(&request.tasks)?;
    let in_degrees = graph.in_degrees();
    let cycle = if has_cycle(&graph) {
        find_cycle(&graph)
    } else {
        None
    };

    if output.is_json() {
        let nodes: Vec<_> = graph
            .titles()
            .zip(&in_degrees)
            .map(|(title, in_degree)| {
                serde_json::json!({
                    "title": title,
                    "inDegree": in_degree,
                    "dependencies": graph.dependencies(title),
                    "dependents": graph.dependents(title),
                })
            })
            .collect();
        output.data(&serde_json::json!({
            "tasks": nodes,
            "cycle": cycle,
        }));
    } else if graph.is_empty() {
        println!("No tasks.");
    } else {
        println!("{:<30} {:>3}  {:<30} REQUIRED BY", "TASK", "IN", "DEPENDS ON");
        println!("{}", "-".repeat(90));
        for (title, in_degree) in graph.titles().zip(&in_degrees) {
            println!(
                "{:<30} {:>3}  {:<30} {}",
                title,
                in_degree,
                graph.dependencies(title).join(", "),
                graph.dependents(title).join(", ")
            );
        }

        if let Some(cycle) = cycle {
            println!();
            println!("Cycle: {}", cycle.join(" -> "));
        }
    }

    Ok(())
}

/// Lists the available tie-break strategies
pub fn strategies(output: &Output, config: &Config) -> Result<()> {
    if output.is_json() {
        let items: Vec<_> = Strategy::ALL
            .iter()
            .map(|s| {
                serde_json::json!({
                    "name": s.as_str(),
                    "keys": s.keys(),
                    "default": *s == config.default_strategy,
                })
            })
            .collect();
        output.data(&items);
    } else {
        println!("{:<14} TIE-BREAK KEYS", "STRATEGY");
        println!("{}", "-".repeat(60));
        for s in Strategy::ALL {
            let marker = if s == config.default_strategy { " (default)" } else { "" };
            println!("{:<14} {}{}", s.as_str(), s.keys().join(" > "), marker);
        }
    }

    Ok(())
}
