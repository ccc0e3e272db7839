//! # Error Handling
//!
//! This module defines the centralized error type for the `pack-combiner`
//! library. It uses the `thiserror` library to create an `Error` enum that
//! covers every failure mode of dependency resolution, merging, and combined
//! pack validation, plus the I/O and parsing failures of the pack loader.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors. Each
//!   variant carries enough context (pack names, cycle paths, strategy names)
//!   to produce a useful message on its own.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Most combination failures are not propagated as `Err` values. The resolver
//! and combiner collect them as display strings on their result objects
//! (`ResolvedDependencies::errors`, `CombinationResult::errors`), so callers
//! inspect `success` instead of matching on errors. `Err` is reserved for
//! misuse (unknown strategy names, selective merges without paths) and for
//! loading packs from disk.

use thiserror::Error;

/// Main error type for pack-combiner operations
#[derive(Error, Debug)]
pub enum Error {
    /// `combine` was called with no packs.
    #[error("No packs provided for combination")]
    EmptyInput,

    /// A pack declares a dependency that is neither requested nor in the catalog.
    #[error("Dependency not found: {name} (required by {required_by})")]
    DependencyNotFound { name: String, required_by: String },

    /// One or more dependency cycles were found.
    ///
    /// Each cycle is an explicit path that starts and ends on the same pack.
    #[error("Circular dependency detected: {}", format_cycles(cycles))]
    CircularDependency { cycles: Vec<Vec<String>> },

    /// The topological sort produced fewer packs than the graph holds.
    ///
    /// This is unreachable when cycle detection works and signals an internal
    /// defect.
    #[error("Load order inconsistency: expected {expected} packs in load order, got {actual}")]
    LoadOrderInconsistency { expected: usize, actual: usize },

    /// A resolved pack name could not be mapped back to a pack value.
    #[error("Resolved pack '{name}' is missing from the supplied packs")]
    UnmappedPack { name: String },

    /// The requested merge strategy name is not known.
    #[error("Unknown merge strategy: {name}")]
    UnknownMergeStrategy { name: String },

    /// A strategy was selected without the options it requires.
    #[error("Merge strategy '{strategy}' misconfigured: {message}")]
    MissingStrategyOptions { strategy: String, message: String },

    /// A merge strategy failed while folding templates.
    #[error("Merge execution failed: {message}")]
    MergeExecution { message: String },

    /// The combined pack failed post-merge validation.
    #[error("Combined pack validation failed: {message}")]
    CombinedPackValidation { message: String },

    /// The dependency graph exceeded a configured resolver limit.
    #[error("Resolver limit exceeded ({limit}): {message}")]
    LimitExceeded { limit: String, message: String },

    /// A pack could not be loaded from disk.
    #[error("Failed to load pack from {path}: {message}")]
    PackLoad { path: String, message: String },

    /// The options file could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Render cycles as `a -> b -> a`, separated by `; `.
pub fn format_cycles(cycles: &[Vec<String>]) -> String {
    cycles
        .iter()
        .map(|cycle| cycle.join(" -> "))
        .collect::<Vec<_>>()
        .join("; ")
}
