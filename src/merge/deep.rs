//! Deep merge strategy
//!
//! Folds templates left to right, merging each into the accumulated result:
//!
//! - A `null` value in the later template removes the key
//! - A key missing from the accumulated result is taken as-is
//! - Two mappings merge recursively
//! - Two sequences combine according to [`ArrayMergeMode`]
//! - Anything else: the later value replaces the earlier one
//!
//! Every step builds new values; input templates are only read.

use log::{debug, warn};
use serde_json::{Map, Value};

use super::{as_mapping, join_path, value_type_name, MergeStrategy};
use crate::config::ArrayMergeMode;
use crate::error::Result;

/// Recursive merge where later templates extend earlier ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeepMergeStrategy {
    array_mode: ArrayMergeMode,
}

impl DeepMergeStrategy {
    pub fn new(array_mode: ArrayMergeMode) -> Self {
        Self { array_mode }
    }

    pub fn array_mode(&self) -> ArrayMergeMode {
        self.array_mode
    }
}

impl MergeStrategy for DeepMergeStrategy {
    fn name(&self) -> &'static str {
        "deep-merge"
    }

    fn merge(&self, templates: &[Value]) -> Result<Value> {
        let mut result = Map::new();
        for (position, template) in templates.iter().enumerate() {
            let extension = as_mapping(template, position)?;
            result = merge_mappings(&result, extension, self.array_mode, "");
        }
        Ok(Value::Object(result))
    }
}

/// Merge `extension` into a copy of `base`.
///
/// `path` is the dot path of the mapping being merged, used for logging.
pub fn merge_mappings(
    base: &Map<String, Value>,
    extension: &Map<String, Value>,
    mode: ArrayMergeMode,
    path: &str,
) -> Map<String, Value> {
    let mut result = base.clone();

    for (key, value) in extension {
        let key_path = join_path(path, key);

        if value.is_null() {
            if result.remove(key).is_some() {
                debug!("Removing '{}' (null in later template)", key_path);
            }
            continue;
        }

        let merged = match result.get(key) {
            Some(existing) => merge_values(existing, value, mode, &key_path),
            None => value.clone(),
        };
        result.insert(key.clone(), merged);
    }

    result
}

/// Merge two values found at the same key.
pub fn merge_values(base: &Value, extension: &Value, mode: ArrayMergeMode, path: &str) -> Value {
    match (base, extension) {
        (Value::Object(base_map), Value::Object(ext_map)) => {
            Value::Object(merge_mappings(base_map, ext_map, mode, path))
        }
        (Value::Array(base_seq), Value::Array(ext_seq)) => {
            Value::Array(merge_arrays(base_seq, ext_seq, mode, path))
        }
        (Value::Object(_), _) | (Value::Array(_), _) | (_, Value::Object(_)) | (_, Value::Array(_)) => {
            warn!(
                "Type mismatch at path '{}': replacing {} with {}",
                path,
                value_type_name(base),
                value_type_name(extension)
            );
            extension.clone()
        }
        _ => {
            debug!(
                "Overwriting value at path '{}': {} -> {}",
                path,
                value_type_name(base),
                value_type_name(extension)
            );
            extension.clone()
        }
    }
}

/// Combine two sequences according to `mode`.
pub fn merge_arrays(base: &[Value], extension: &[Value], mode: ArrayMergeMode, path: &str) -> Vec<Value> {
    match mode {
        ArrayMergeMode::Append => base.iter().chain(extension).cloned().collect(),
        ArrayMergeMode::AppendUnique => {
            let mut result = base.to_vec();
            for item in extension {
                if !result.contains(item) {
                    result.push(item.clone());
                }
            }
            result
        }
        ArrayMergeMode::Replace => {
            debug!(
                "Replacing array at path '{}' (old size: {}, new size: {})",
                path,
                base.len(),
                extension.len()
            );
            extension.to_vec()
        }
    }
}
