//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the
//! dependency tree of a pack in a hierarchical format.
//!
//! ## Functionality
//!
//! - **Dependency Visualization**: Each node shows `name @ version` as
//!   declared by its dependent.
//! - **Depth Control**: Supports `--depth` to limit how far the tree expands.
//! - **Problem Markers**: Dependencies missing from the catalog are marked
//!   `(missing)`; a dependency that loops back to an ancestor is marked
//!   `(cycle)` and not expanded further.
//! - **Shared Subtrees**: A pack with dependencies is expanded once; later
//!   occurrences are marked `(see above)`.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use pack_combiner::pack::Pack;

/// Display the dependency tree of a pack
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Name of the pack at the root of the tree.
    #[arg(value_name = "PACK")]
    pub pack: String,

    /// Directory containing one subdirectory per pack.
    #[arg(short, long, value_name = "DIR", default_value = ".", env = "PACK_COMBINER_CATALOG")]
    pub catalog: PathBuf,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the root pack, 1 to show direct dependencies, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let catalog = super::load_catalog(&args.catalog)?;
    let root = super::select_packs(&[&args.pack], &catalog)?.remove(0);

    println!("🌳 Dependency tree for: {}", root.name());

    let lookup: HashMap<&str, &Pack> = catalog.iter().map(|p| (p.name(), p)).collect();
    let label = format!("{} @ {}", root.name(), root.version());
    let mut walk = TreeWalk {
        lookup,
        ancestors: vec![root.name()],
        expanded: HashSet::new(),
        max_depth: args.depth.unwrap_or(usize::MAX),
    };
    let tree_root = walk.build_node(&root, label, 0);
    print_tree(&tree_root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;

    Ok(())
}

/// State for one depth-first walk of the dependency tree.
struct TreeWalk<'a> {
    lookup: HashMap<&'a str, &'a Pack>,
    /// Names on the path from the root to the current pack.
    ancestors: Vec<&'a str>,
    /// Packs whose dependencies have already been printed.
    expanded: HashSet<&'a str>,
    max_depth: usize,
}

impl<'a> TreeWalk<'a> {
    /// Build a tree node for `pack`, expanding its dependencies recursively.
    fn build_node(&mut self, pack: &'a Pack, label: String, current_depth: usize) -> TreeNode {
        if current_depth >= self.max_depth {
            return TreeNode::leaf(label);
        }
        self.expanded.insert(pack.name());

        let mut children = Vec::with_capacity(pack.dependencies().len());
        for dep in pack.dependencies() {
            let child_label = format!("{} @ {}", dep.name, dep.version);
            let child = match self.lookup.get(dep.name.as_str()).copied() {
                None => TreeNode::leaf(format!("{} (missing)", child_label)),
                Some(_) if self.ancestors.contains(&dep.name.as_str()) => {
                    TreeNode::leaf(format!("{} (cycle)", child_label))
                }
                Some(next)
                    if !next.dependencies().is_empty()
                        && self.expanded.contains(next.name()) =>
                {
                    TreeNode::leaf(format!("{} (see above)", child_label))
                }
                Some(next) => {
                    self.ancestors.push(next.name());
                    let node = self.build_node(next, child_label, current_depth + 1);
                    self.ancestors.pop();
                    node
                }
            };
            children.push(child);
        }

        TreeNode { label, children }
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone, Debug)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: vec![],
        }
    }
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
