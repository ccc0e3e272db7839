//! Merge strategies for pack templates
//!
//! A merge strategy folds an ordered list of templates into one. The list is
//! already in load order (dependencies first), so later templates extend or
//! replace what earlier ones defined.
//!
//! ## Strategies
//!
//! - Deep merge (deep.rs) - Recursive merge; arrays concatenate, `null` removes a key
//! - Override (overriding.rs) - The last template wins outright
//! - Selective (selective.rs) - Per-path choice between override, merge, and deep merge
//!
//! Dot-path patterns used by the selective strategy live in pattern.rs and are
//! usable on their own.
//!
//! ## Choosing a strategy
//!
//! [`create_strategy`] maps `CombinationOptions` to a boxed strategy. Asking for
//! the selective strategy without any path lists is a misuse error, reported
//! as `Error::MissingStrategyOptions`.

use std::fmt;

use serde_json::{Map, Value};

use crate::config::{CombinationOptions, MergeStrategyKind};
use crate::error::{Error, Result};

pub mod deep;
pub mod overriding;
pub mod pattern;
pub mod selective;

pub use deep::DeepMergeStrategy;
pub use overriding::OverrideStrategy;
pub use pattern::{matches_any, matches_pattern};
pub use selective::{PathDecision, SelectiveStrategy};

/// Folds an ordered sequence of templates into a single template.
pub trait MergeStrategy: fmt::Debug {
    /// Strategy name as used in options (`deep-merge`, `override`, `selective`).
    fn name(&self) -> &'static str;

    /// Merge `templates`, earliest first. Inputs are never modified.
    ///
    /// # Errors
    ///
    /// Returns `Error::MergeExecution` if a template is not a mapping.
    fn merge(&self, templates: &[Value]) -> Result<Value>;
}

/// Build the strategy selected by `options`.
///
/// # Errors
///
/// Returns `Error::MissingStrategyOptions` when the selective strategy is
/// requested with neither `override_paths` nor `merge_paths`.
pub fn create_strategy(options: &CombinationOptions) -> Result<Box<dyn MergeStrategy>> {
    match options.strategy {
        MergeStrategyKind::DeepMerge => Ok(Box::new(DeepMergeStrategy::new(options.array_mode))),
        MergeStrategyKind::Override => Ok(Box::new(OverrideStrategy)),
        MergeStrategyKind::Selective => {
            if options.override_paths.is_none() && options.merge_paths.is_none() {
                return Err(Error::MissingStrategyOptions {
                    strategy: MergeStrategyKind::Selective.to_string(),
                    message: "override-paths or merge-paths must be provided".to_string(),
                });
            }
            Ok(Box::new(SelectiveStrategy::new(
                options.override_paths.clone().unwrap_or_default(),
                options.merge_paths.clone().unwrap_or_default(),
                options.array_mode,
            )))
        }
    }
}

/// Build a strategy by name, taking the remaining settings from `options`.
///
/// # Errors
///
/// Returns `Error::UnknownMergeStrategy` for an unrecognised name, plus the
/// errors of [`create_strategy`].
pub fn create_strategy_by_name(
    name: &str,
    options: &CombinationOptions,
) -> Result<Box<dyn MergeStrategy>> {
    let strategy = name.parse::<MergeStrategyKind>()?;
    create_strategy(&CombinationOptions {
        strategy,
        ..options.clone()
    })
}

/// Borrow `template` as a mapping, failing with its position otherwise.
pub(crate) fn as_mapping(template: &Value, position: usize) -> Result<&Map<String, Value>> {
    template.as_object().ok_or_else(|| Error::MergeExecution {
        message: format!(
            "template at position {} is a {}, expected a mapping",
            position,
            value_type_name(template)
        ),
    })
}

/// Join a parent dot path and a key.
pub(crate) fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Get a human-readable type name for a template value
///
/// Used for logging and error messages to describe the type of a value.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Sequence",
        Value::Object(_) => "Mapping",
    }
}
