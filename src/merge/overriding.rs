//! Override strategy: the last template in load order replaces everything
//! before it. Arrays are replaced wholesale, never concatenated.

use serde_json::{Map, Value};

use super::{as_mapping, MergeStrategy};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverrideStrategy;

impl MergeStrategy for OverrideStrategy {
    fn name(&self) -> &'static str {
        "override"
    }

    fn merge(&self, templates: &[Value]) -> Result<Value> {
        match templates.last() {
            Some(last) => Ok(Value::Object(as_mapping(last, templates.len() - 1)?.clone())),
            None => Ok(Value::Object(Map::new())),
        }
    }
}
