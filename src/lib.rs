//! # Pack Combiner Library
//!
//! This library combines reusable, versioned domain packs into a single
//! merged pack. Packs declare dependencies on each other; the library resolves
//! them into a deterministic load order, rejects cycles and missing packs, and
//! folds the pack templates together with a selectable merge strategy.
//!
//! ## Quick Example
//!
//! ```
//! use pack_combiner::combiner::PackCombiner;
//! use pack_combiner::config::CombinationOptions;
//! use pack_combiner::pack::Pack;
//! use serde_json::json;
//!
//! let base = Pack::new("base", "1.0.0").with_template(json!({"checks": ["lint"]}));
//! let api = Pack::new("api", "1.0.0")
//!     .with_dependency("base", "1.0.0")
//!     .with_template(json!({"checks": ["contract-tests"], "port": 8080}));
//!
//! let result = PackCombiner::new().combine(&[api], &[base], &CombinationOptions::default());
//!
//! assert!(result.success);
//! let combined = result.combined_pack.unwrap();
//! assert_eq!(combined.combination_order, vec!["base", "api"]);
//! assert_eq!(combined.template["checks"], json!(["lint", "contract-tests"]));
//! ```
//!
//! ## Core Concepts
//!
//! - **Packs (`pack`)**: Manifest, opaque schema, and template of a domain pack,
//!   plus the combined pack produced from several of them.
//! - **Options (`config`)**: Merge strategy, selective path lists, array mode,
//!   validation and resolution switches, and resolver limits.
//! - **Resolution (`resolver`)**: Dependency graph construction, cycle
//!   detection, and topological ordering.
//! - **Merging (`merge`)**: Deep-merge, override, and selective strategies
//!   behind the `MergeStrategy` trait.
//! - **Combination (`combiner`)**: `combine`, `combine_by_name`, and `preview`.
//! - **Loading (`loader`)**: Reading packs and catalogs from disk.
//!
//! ## Execution Flow
//!
//! `PackCombiner::combine` runs these steps:
//!
//! 1.  **Graph Construction**: Walk dependencies breadth-first from the
//!     requested packs.
//! 2.  **Cycle Detection**: Depth-first search for dependency loops.
//! 3.  **Ordering**: Kahn's algorithm with alphabetical tie-breaking.
//! 4.  **Merging**: Fold templates in load order with the chosen strategy.
//! 5.  **Manifest Synthesis**: Name, version, sources, and merged dependencies.
//! 6.  **Validation**: Structural checks reported as errors or warnings.
//!
//! Everything is synchronous and in memory. Failures are collected on the
//! result instead of being returned as `Err`, so callers check `success`.

pub mod combiner;
pub mod config;
pub mod error;
pub mod loader;
pub mod merge;
pub mod output;
pub mod pack;
pub mod resolver;

#[cfg(test)]
mod combine_proptest;
