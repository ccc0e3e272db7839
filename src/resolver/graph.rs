//! Dependency graph construction.
//!
//! Breadth-first traversal starting from the requested packs. Every pack is
//! processed at most once, so diamond-shaped dependencies produce a single node.
//! A dependency that cannot be found anywhere aborts construction immediately;
//! no partial graph is returned.

use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use super::{DependencyGraph, GraphNode};
use crate::config::ResolverLimits;
use crate::error::{Error, Result};
use crate::pack::Pack;

/// Build the dependency graph reachable from `requested`.
///
/// Dependencies are looked up by exact name in `requested` and `catalog`.
/// When both contain a pack with the same name, the requested one is used.
///
/// # Errors
///
/// - `Error::DependencyNotFound` for the first dependency with no matching pack
/// - `Error::LimitExceeded` when the graph grows past `limits.max_nodes` or a
///   dependency sits deeper than `limits.max_depth`
pub fn build_graph(
    requested: &[Pack],
    catalog: &[Pack],
    limits: &ResolverLimits,
) -> Result<DependencyGraph> {
    let lookup = pack_lookup(requested, catalog);

    let mut graph = DependencyGraph::new();
    let mut processed: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<(&Pack, usize)> = VecDeque::new();

    for pack in requested {
        if processed.insert(pack.name()) {
            queue.push_back((lookup[pack.name()], 0));
        }
    }

    while let Some((pack, depth)) = queue.pop_front() {
        if graph.len() >= limits.max_nodes {
            return Err(Error::LimitExceeded {
                limit: "max-nodes".to_string(),
                message: format!(
                    "dependency graph has more than {} packs",
                    limits.max_nodes
                ),
            });
        }

        debug!(
            "Adding '{}@{}' to dependency graph at depth {}",
            pack.name(),
            pack.version(),
            depth
        );
        graph.insert(GraphNode::new(
            pack.name().to_string(),
            pack.version().to_string(),
            pack.dependencies().to_vec(),
        ));

        for dep in pack.dependencies() {
            if processed.contains(dep.name.as_str()) {
                continue;
            }

            let Some(&found) = lookup.get(dep.name.as_str()) else {
                return Err(Error::DependencyNotFound {
                    name: dep.name.clone(),
                    required_by: pack.name().to_string(),
                });
            };

            if depth + 1 > limits.max_depth {
                return Err(Error::LimitExceeded {
                    limit: "max-depth".to_string(),
                    message: format!(
                        "'{}' is more than {} dependencies away from a requested pack",
                        dep.name, limits.max_depth
                    ),
                });
            }

            processed.insert(found.name());
            queue.push_back((found, depth + 1));
        }
    }

    graph.mark_resolved();
    Ok(graph)
}

/// Name index over `requested` and `catalog`.
///
/// Requested packs shadow catalog packs. Within each list the first pack with
/// a given name wins, matching a linear `find` over the list.
pub(crate) fn pack_lookup<'a>(
    requested: &'a [Pack],
    catalog: &'a [Pack],
) -> HashMap<&'a str, &'a Pack> {
    let mut lookup = HashMap::with_capacity(requested.len() + catalog.len());
    for pack in requested.iter().chain(catalog) {
        lookup.entry(pack.name()).or_insert(pack);
    }
    lookup
}
