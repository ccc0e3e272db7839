//! Dependency resolution for domain packs.
//!
//! ## Overview
//!
//! Resolution runs in three stages, each in its own module:
//! 1. Graph construction ([`graph`]) - Breadth-first walk from the requested
//!    packs, looking dependencies up by exact name in the requested packs and
//!    the catalog
//! 2. Cycle detection ([`cycles`]) - Depth-first search reporting every
//!    dependency loop as an explicit path
//! 3. Ordering ([`ordering`]) - Kahn's algorithm producing a load order where
//!    every dependency precedes its dependents
//!
//! The graph is an arena of [`GraphNode`]s with a name index. Edges are stored
//! as dependency names and looked up through the index, so the structure never
//! holds references between nodes and serializes as plain data.
//!
//! [`DependencyResolver`] is stateless apart from its [`ResolverLimits`] and can
//! be shared freely. Failures are collected on [`ResolvedDependencies`] rather
//! than returned as errors.

use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::ResolverLimits;
use crate::error::Error;
use crate::pack::{DependencyRef, Pack};

pub mod cycles;
pub mod graph;
pub mod ordering;

pub use cycles::detect_cycles;
pub use graph::build_graph;
pub use ordering::topological_sort;

/// A pack in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub name: String,
    pub version: String,
    /// Dependencies exactly as declared by the pack's manifest.
    pub dependencies: Vec<DependencyRef>,
    /// Set once graph construction has completed.
    pub resolved: bool,
}

impl GraphNode {
    pub fn new(name: String, version: String, dependencies: Vec<DependencyRef>) -> Self {
        Self {
            name,
            version,
            dependencies,
            resolved: false,
        }
    }
}

/// Dependency graph stored as an arena of nodes plus a name index.
///
/// Nodes keep the order in which they were discovered.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    nodes: Vec<GraphNode>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning its arena index.
    ///
    /// Inserting a name that is already present returns the existing index
    /// and leaves the graph unchanged.
    pub fn insert(&mut self, node: GraphNode) -> usize {
        if let Some(&idx) = self.index.get(&node.name) {
            return idx;
        }
        let idx = self.nodes.len();
        self.index.insert(node.name.clone(), idx);
        self.nodes.push(node);
        idx
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&GraphNode> {
        self.index_of(name).map(|idx| &self.nodes[idx])
    }

    pub fn node(&self, idx: usize) -> &GraphNode {
        &self.nodes[idx]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Arena indices of a node's dependencies, deduplicated, in declaration
    /// order. Names missing from the graph are skipped.
    pub fn dependency_indices(&self, idx: usize) -> Vec<usize> {
        let mut seen = HashSet::new();
        self.nodes[idx]
            .dependencies
            .iter()
            .filter_map(|dep| self.index_of(&dep.name))
            .filter(|dep_idx| seen.insert(*dep_idx))
            .collect()
    }

    pub(crate) fn mark_resolved(&mut self) {
        for node in &mut self.nodes {
            node.resolved = true;
        }
    }
}

/// Outcome of [`DependencyResolver::resolve`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDependencies {
    /// Pack names, dependencies first. Empty unless `success`.
    pub load_order: Vec<String>,
    /// Empty when a dependency could not be found.
    pub graph: DependencyGraph,
    pub circular_dependencies: Vec<Vec<String>>,
    pub success: bool,
    pub errors: Vec<String>,
}

impl ResolvedDependencies {
    fn failed(graph: DependencyGraph, circular_dependencies: Vec<Vec<String>>, error: Error) -> Self {
        Self {
            load_order: Vec::new(),
            graph,
            circular_dependencies,
            success: false,
            errors: vec![error.to_string()],
        }
    }
}

/// Outcome of [`DependencyResolver::validate_dependencies`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    /// Version mismatches. These do not affect `valid`.
    pub warnings: Vec<String>,
}

/// Resolves pack dependencies into a deterministic load order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyResolver {
    limits: ResolverLimits,
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ResolverLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ResolverLimits {
        &self.limits
    }

    /// Build the dependency graph for `packs`, check it for cycles, and
    /// compute a load order.
    ///
    /// `packs` and `available` together form the lookup universe; a requested
    /// pack shadows a catalog pack of the same name.
    pub fn resolve(&self, packs: &[Pack], available: &[Pack]) -> ResolvedDependencies {
        let graph = match build_graph(packs, available, &self.limits) {
            Ok(graph) => graph,
            Err(err) => {
                warn!("Dependency graph construction failed: {}", err);
                return ResolvedDependencies::failed(DependencyGraph::new(), Vec::new(), err);
            }
        };
        debug!("Built dependency graph with {} packs", graph.len());

        let cycles = detect_cycles(&graph);
        if !cycles.is_empty() {
            let err = Error::CircularDependency {
                cycles: cycles.clone(),
            };
            warn!("{}", err);
            return ResolvedDependencies::failed(graph, cycles, err);
        }

        match topological_sort(&graph) {
            Ok(load_order) => {
                info!("Resolved load order: {}", load_order.join(", "));
                ResolvedDependencies {
                    load_order,
                    graph,
                    circular_dependencies: Vec::new(),
                    success: true,
                    errors: Vec::new(),
                }
            }
            Err(err) => {
                warn!("{}", err);
                ResolvedDependencies::failed(graph, Vec::new(), err)
            }
        }
    }

    /// Check that each dependency `pack` declares is present in `available`.
    ///
    /// A missing dependency is an error; a present dependency whose version
    /// differs from the declared one is a warning.
    pub fn validate_dependencies(&self, pack: &Pack, available: &[Pack]) -> DependencyValidation {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for dep in pack.dependencies() {
            match available.iter().find(|candidate| candidate.name() == dep.name) {
                None => errors.push(
                    Error::DependencyNotFound {
                        name: dep.name.clone(),
                        required_by: pack.name().to_string(),
                    }
                    .to_string(),
                ),
                Some(found) if found.version() != dep.version => {
                    let message = format!(
                        "Version mismatch for dependency '{}' of '{}': requires {}, found {}",
                        dep.name,
                        pack.name(),
                        dep.version,
                        found.version()
                    );
                    warn!("{}", message);
                    warnings.push(message);
                }
                Some(_) => {}
            }
        }

        DependencyValidation {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Names of every pack `name` depends on, directly or transitively.
    ///
    /// Breadth-first over declared dependencies, deduplicated, excluding
    /// `name` itself. Dependencies missing from `available` are listed but not
    /// expanded. An unknown `name` yields an empty list.
    pub fn get_transitive_dependencies(&self, name: &str, available: &[Pack]) -> Vec<String> {
        let lookup = graph::pack_lookup(&[], available);
        let Some(&root) = lookup.get(name) else {
            return Vec::new();
        };

        let mut seen: HashSet<&str> = HashSet::from([name]);
        let mut result = Vec::new();
        let mut queue: VecDeque<&Pack> = VecDeque::from([root]);

        while let Some(pack) = queue.pop_front() {
            for dep in pack.dependencies() {
                if !seen.insert(dep.name.as_str()) {
                    continue;
                }
                result.push(dep.name.clone());
                if let Some(&next) = lookup.get(dep.name.as_str()) {
                    queue.push_back(next);
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(name: &str, deps: &[&str]) -> Pack {
        deps.iter()
            .fold(Pack::new(name, "1.0.0"), |p, dep| p.with_dependency(*dep, "1.0.0"))
    }

    #[test]
    fn test_graph_insert_is_idempotent() {
        let mut graph = DependencyGraph::new();
        let first = graph.insert(GraphNode::new("a".into(), "1.0.0".into(), vec![]));
        let second = graph.insert(GraphNode::new("a".into(), "2.0.0".into(), vec![]));
        assert_eq!(first, second);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get("a").unwrap().version, "1.0.0");
    }

    #[test]
    fn test_dependency_indices_deduplicates() {
        let mut graph = DependencyGraph::new();
        graph.insert(GraphNode::new("a".into(), "1.0.0".into(), vec![]));
        let b = graph.insert(GraphNode::new(
            "b".into(),
            "1.0.0".into(),
            vec![DependencyRef::new("a", "1.0.0"), DependencyRef::new("a", "1.0.0")],
        ));
        assert_eq!(graph.dependency_indices(b), vec![0]);
    }

    #[test]
    fn test_resolve_linear_chain() {
        let a = pack("a", &[]);
        let b = pack("b", &["a"]);
        let c = pack("c", &["b"]);

        let result = DependencyResolver::new().resolve(&[c], &[a, b]);

        assert!(result.success);
        assert_eq!(result.load_order, vec!["a", "b", "c"]);
        assert_eq!(result.graph.len(), 3);
        assert!(result.graph.nodes().iter().all(|n| n.resolved));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_resolve_missing_dependency() {
        let a = pack("pack-a", &["missing-pack"]);

        let result = DependencyResolver::new().resolve(&[a], &[]);

        assert!(!result.success);
        assert!(result.load_order.is_empty());
        assert!(result.graph.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("missing-pack"));
    }

    #[test]
    fn test_resolve_cycle() {
        let a = pack("a", &["b"]);
        let b = pack("b", &["a"]);

        let result = DependencyResolver::new().resolve(&[a], &[b]);

        assert!(!result.success);
        assert!(result.load_order.is_empty());
        assert_eq!(result.circular_dependencies, vec![vec!["a", "b", "a"]]);
        assert!(result.errors[0].contains("a -> b -> a"));
        assert_eq!(result.graph.len(), 2);
    }

    #[test]
    fn test_resolve_respects_node_limit() {
        let a = pack("a", &[]);
        let b = pack("b", &["a"]);
        let c = pack("c", &["b"]);
        let resolver = DependencyResolver::with_limits(ResolverLimits {
            max_nodes: 2,
            ..ResolverLimits::default()
        });

        let result = resolver.resolve(&[c], &[a, b]);

        assert!(!result.success);
        assert!(result.errors[0].contains("max-nodes"));
    }

    #[test]
    fn test_validate_dependencies_missing_and_mismatch() {
        let app = Pack::new("app", "1.0.0")
            .with_dependency("base", "1.0.0")
            .with_dependency("ghost", "1.0.0");
        let base = Pack::new("base", "2.0.0");

        let validation = DependencyResolver::new().validate_dependencies(&app, &[base]);

        assert!(!validation.valid);
        assert_eq!(validation.errors.len(), 1);
        assert!(validation.errors[0].contains("ghost"));
        assert_eq!(validation.warnings.len(), 1);
        assert!(validation.warnings[0].contains("requires 1.0.0, found 2.0.0"));
    }

    #[test]
    fn test_validate_dependencies_mismatch_only_is_valid() {
        let app = Pack::new("app", "1.0.0").with_dependency("base", "1.0.0");
        let base = Pack::new("base", "1.1.0");

        let validation = DependencyResolver::new().validate_dependencies(&app, &[base]);

        assert!(validation.valid);
        assert_eq!(validation.warnings.len(), 1);
    }

    #[test]
    fn test_transitive_dependencies_diamond() {
        let a = pack("A", &[]);
        let b = pack("B", &["A"]);
        let c = pack("C", &["A"]);
        let d = pack("D", &["B", "C"]);

        let mut deps = DependencyResolver::new().get_transitive_dependencies("D", &[a, b, c, d]);
        deps.sort();

        assert_eq!(deps, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_transitive_dependencies_excludes_root_in_cycle() {
        let a = pack("a", &["b"]);
        let b = pack("b", &["a"]);

        let deps = DependencyResolver::new().get_transitive_dependencies("a", &[a, b]);

        assert_eq!(deps, vec!["b"]);
    }

    #[test]
    fn test_transitive_dependencies_unknown_root() {
        let deps = DependencyResolver::new().get_transitive_dependencies("nope", &[]);
        assert!(deps.is_empty());
    }
}
