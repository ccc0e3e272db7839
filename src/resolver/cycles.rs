//! Circular dependency detection.
//!
//! A cycle exists when a pack appears twice on a single dependency path. The
//! search runs depth-first from every node not yet visited, in graph discovery
//! order, keeping the active path. Reaching a node that is still on the path
//! closes a cycle, which is reported as the path slice from that node's first
//! occurrence through the current node, followed by the node again
//! (`a -> b -> a`).
//!
//! Every back edge found produces one cycle, so independent cycles reachable
//! from different roots are all reported. Nodes are marked visited once fully
//! explored and never re-entered, which bounds the search by the edge count.
//! This does not enumerate every elementary cycle of a densely cyclic graph.

use super::DependencyGraph;

/// Find dependency cycles in `graph`.
///
/// Returns an empty list for an acyclic graph.
pub fn detect_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let mut search = CycleSearch {
        graph,
        visited: vec![false; graph.len()],
        on_path: vec![false; graph.len()],
        path: Vec::new(),
        cycles: Vec::new(),
    };

    for idx in 0..graph.len() {
        if !search.visited[idx] {
            search.visit(idx);
        }
    }

    search.cycles
}

struct CycleSearch<'a> {
    graph: &'a DependencyGraph,
    visited: Vec<bool>,
    on_path: Vec<bool>,
    path: Vec<usize>,
    cycles: Vec<Vec<String>>,
}

impl CycleSearch<'_> {
    fn visit(&mut self, idx: usize) {
        self.on_path[idx] = true;
        self.path.push(idx);

        for dep in self.graph.dependency_indices(idx) {
            if self.on_path[dep] {
                self.record_cycle(dep);
            } else if !self.visited[dep] {
                self.visit(dep);
            }
        }

        self.path.pop();
        self.on_path[idx] = false;
        self.visited[idx] = true;
    }

    fn record_cycle(&mut self, start: usize) {
        let Some(pos) = self.path.iter().position(|&idx| idx == start) else {
            return;
        };
        let mut cycle: Vec<String> = self.path[pos..]
            .iter()
            .map(|&idx| self.graph.node(idx).name.clone())
            .collect();
        cycle.push(self.graph.node(start).name.clone());
        self.cycles.push(cycle);
    }
}
