//! Selective merge strategy
//!
//! Walks each later template top-down, tracking the dot path of every key,
//! and makes one decision per key:
//!
//! | Path matches      | Decision               | Effect                                              |
//! |-------------------|------------------------|-----------------------------------------------------|
//! | an override path  | [`PathDecision::Override`] | later value is stored verbatim (even `null`)     |
//! | a merge path      | [`PathDecision::Merge`]    | arrays concatenate, mappings recurse, scalars replace |
//! | neither           | [`PathDecision::Default`]  | deep-merge behavior with the configured array mode |
//!
//! Override paths are checked first. Mappings are recursed with the same walk in
//! both the merge and default branches, so patterns deeper in the tree still
//! apply below a key that did not match.

use serde_json::{Map, Value};

use super::deep::merge_values;
use super::pattern::matches_any;
use super::{as_mapping, join_path, MergeStrategy};
use crate::config::ArrayMergeMode;
use crate::error::Result;

/// How a single key is merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDecision {
    Override,
    Merge,
    Default,
}

/// Decide how the key at `path` is merged.
pub fn decide(path: &str, override_paths: &[String], merge_paths: &[String]) -> PathDecision {
    if matches_any(path, override_paths) {
        PathDecision::Override
    } else if matches_any(path, merge_paths) {
        PathDecision::Merge
    } else {
        PathDecision::Default
    }
}

/// Merge with per-path override and merge rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectiveStrategy {
    override_paths: Vec<String>,
    merge_paths: Vec<String>,
    array_mode: ArrayMergeMode,
}

impl SelectiveStrategy {
    pub fn new(override_paths: Vec<String>, merge_paths: Vec<String>, array_mode: ArrayMergeMode) -> Self {
        Self {
            override_paths,
            merge_paths,
            array_mode,
        }
    }

    pub fn decide(&self, path: &str) -> PathDecision {
        decide(path, &self.override_paths, &self.merge_paths)
    }

    fn merge_mappings(
        &self,
        base: &Map<String, Value>,
        extension: &Map<String, Value>,
        path: &str,
    ) -> Map<String, Value> {
        let mut result = base.clone();

        for (key, value) in extension {
            let key_path = join_path(path, key);
            let merged = match self.decide(&key_path) {
                PathDecision::Override => Some(value.clone()),
                PathDecision::Merge => self.merge_at_path(result.get(key), value, &key_path),
                PathDecision::Default => self.default_at_path(result.get(key), value, &key_path),
            };

            match merged {
                Some(merged) => {
                    result.insert(key.clone(), merged);
                }
                None => {
                    result.remove(key);
                }
            }
        }

        result
    }

    /// Merge-path branch. `None` removes the key.
    fn merge_at_path(&self, existing: Option<&Value>, value: &Value, path: &str) -> Option<Value> {
        match (existing, value) {
            (_, Value::Null) => None,
            (Some(Value::Array(base)), Value::Array(ext)) => {
                Some(Value::Array(base.iter().chain(ext).cloned().collect()))
            }
            (Some(Value::Object(base)), Value::Object(ext)) => {
                Some(Value::Object(self.merge_mappings(base, ext, path)))
            }
            _ => Some(value.clone()),
        }
    }

    /// Default branch: deep-merge semantics. `None` removes the key.
    fn default_at_path(&self, existing: Option<&Value>, value: &Value, path: &str) -> Option<Value> {
        match (existing, value) {
            (_, Value::Null) => None,
            (None, _) => Some(value.clone()),
            (Some(Value::Object(base)), Value::Object(ext)) => {
                Some(Value::Object(self.merge_mappings(base, ext, path)))
            }
            (Some(existing), _) => Some(merge_values(existing, value, self.array_mode, path)),
        }
    }
}

impl MergeStrategy for SelectiveStrategy {
    fn name(&self) -> &'static str {
        "selective"
    }

    fn merge(&self, templates: &[Value]) -> Result<Value> {
        let mut result = Map::new();
        for (position, template) in templates.iter().enumerate() {
            let extension = as_mapping(template, position)?;
            result = self.merge_mappings(&result, extension, "");
        }
        Ok(Value::Object(result))
    }
}
