//! Determining pack load order.
//!
//! Runs after cycle detection has passed. Its responsibility is to turn the
//! dependency graph into a linear load order in which every pack appears after
//! all of its dependencies, so base templates are merged before the packs that
//! extend them.
//!
//! ## Process
//!
//! 1.  **In-degree**: Each pack's in-degree is the number of distinct
//!     dependencies it declares; edges point from dependency to dependent.
//!
//! 2.  **Kahn's Algorithm**: Packs with in-degree zero are ready. The ready pack
//!     that sorts first by name is emitted, and each of its dependents loses one
//!     in-degree, becoming ready at zero.
//!
//! 3.  **Consistency Check**: If fewer packs were emitted than the graph holds,
//!     a cycle slipped past detection and the sort fails.
//!
//! Ties among ready packs are broken alphabetically, so the order depends only
//! on the graph's edges and never on input order.

use std::collections::BTreeSet;

use log::debug;

use super::DependencyGraph;
use crate::error::{Error, Result};

/// Compute the load order for an acyclic `graph`.
///
/// # Errors
///
/// Returns `Error::LoadOrderInconsistency` if the order does not cover every
/// node, which only happens when the graph contains a cycle.
pub fn topological_sort(graph: &DependencyGraph) -> Result<Vec<String>> {
    let mut in_degree = vec![0usize; graph.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); graph.len()];

    for idx in 0..graph.len() {
        for dep in graph.dependency_indices(idx) {
            dependents[dep].push(idx);
            in_degree[idx] += 1;
        }
    }

    let mut ready: BTreeSet<(&str, usize)> = (0..graph.len())
        .filter(|&idx| in_degree[idx] == 0)
        .map(|idx| (graph.node(idx).name.as_str(), idx))
        .collect();

    let mut order = Vec::with_capacity(graph.len());
    while let Some((name, idx)) = ready.pop_first() {
        debug!("Load order position {}: {}", order.len(), name);
        order.push(name.to_string());

        for &dependent in &dependents[idx] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.insert((graph.node(dependent).name.as_str(), dependent));
            }
        }
    }

    if order.len() != graph.len() {
        return Err(Error::LoadOrderInconsistency {
            expected: graph.len(),
            actual: order.len(),
        });
    }

    Ok(order)
}
