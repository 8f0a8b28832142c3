//! Ordering commands (order, check)

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use super::output::Output;
use crate::domain::{check_tasks, compute_order_with, EligibleQueue, OrderingError, Strategy};
use crate::storage::{Config, OrderRequest, RequestError};

/// Computes and prints the recommended order
pub fn order(
    output: &Output,
    config: &Config,
    file: Option<&Path>,
    strategy: Option<Strategy>,
    queue: Option<EligibleQueue>,
) -> Result<()> {
    let request = load_request(output, file)?;
    request.ensure_not_empty().inspect_err(|e| output.failure(e))?;

    let strategy = request.effective_strategy(strategy, config.default_strategy);
    let mut options = config.engine_options();
    if let Some(queue) = queue {
        options.queue = queue;
    }
    debug!(tasks = request.tasks.len(), %strategy, "loaded request");

    let result = compute_order_with(&request.tasks, strategy, &options)
        .inspect_err(|e| report(output, e))?;
    info!(tasks = result.recommended_order.len(), strategy = %result.strategy_used, "order computed");

    if output.is_json() {
        output.data(&result);
    } else {
        println!("Recommended order ({}):", result.strategy_used);
        let width = result.recommended_order.len().to_string().len();
        for (i, title) in result.recommended_order.iter().enumerate() {
            println!("  {:>width$}. {}", i + 1, title, width = width);
        }
    }

    Ok(())
}

/// Validates a request and checks it for cycles without ordering it
pub fn check(output: &Output, config: &Config, file: Option<&Path>) -> Result<()> {
    let request = load_request(output, file)?;
    request.ensure_not_empty().inspect_err(|e| output.failure(e))?;

    let graph = check_tasks(&request.tasks, config.engine_options().max_tasks)
        .inspect_err(|e| report(output, e))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "success": true,
            "tasks": graph.len(),
            "dependencies": graph.edge_count(),
        }));
    } else {
        println!(
            "OK: {} tasks, {} dependencies, no cycles",
            graph.len(),
            graph.edge_count()
        );
    }

    Ok(())
}

/// Loads the request, reporting parse failures as invalid input
pub(super) fn load_request(output: &Output, file: Option<&Path>) -> Result<OrderRequest> {
    OrderRequest::load(file).inspect_err(|e| {
        if e.downcast_ref::<RequestError>().is_some() {
            output.unreadable_request(e);
        }
    })
}

fn report(output: &Output, err: &OrderingError) {
    if let OrderingError::Internal(detail) = err {
        debug!(%detail, "internal failure detail");
    }
    output.failure(err);
}
