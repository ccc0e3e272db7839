//! # Combination Options and Parsing
//!
//! This module defines the options that control a combination: which merge
//! strategy to use, the path lists of the selective strategy, how arrays are
//! merged, whether dependencies are resolved and the result validated, and the
//! limits that bound dependency resolution.
//!
//! ## Key Components
//!
//! - **`CombinationOptions`**: Everything `PackCombiner::combine` needs beyond
//!   the packs themselves. Every field has a default, so an empty options file
//!   is valid.
//!
//! - **`MergeStrategyKind`**: The strategy selector. Parsed from its kebab-case
//!   name (`deep-merge`, `override`, `selective`).
//!
//! - **`ArrayMergeMode`**: How the deep-merge strategy treats two sequences at
//!   the same key.
//!
//! - **`ResolverLimits`**: Caps on graph size and traversal depth.
//!
//! ## Parsing
//!
//! Options can be stored in a YAML file using kebab-case keys:
//!
//! ```yaml
//! strategy: selective
//! override-paths: ["service.name"]
//! merge-paths: ["checks.*"]
//! array-mode: append-unique
//! limits:
//!   max-nodes: 200
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Available merge strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategyKind {
    /// Recursive merge; later packs extend earlier ones.
    #[default]
    DeepMerge,
    /// The last template wins outright.
    Override,
    /// Per-path choice between override, merge, and deep-merge.
    Selective,
}

impl MergeStrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategyKind::DeepMerge => "deep-merge",
            MergeStrategyKind::Override => "override",
            MergeStrategyKind::Selective => "selective",
        }
    }
}

impl fmt::Display for MergeStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeStrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deep-merge" => Ok(MergeStrategyKind::DeepMerge),
            "override" => Ok(MergeStrategyKind::Override),
            "selective" => Ok(MergeStrategyKind::Selective),
            other => Err(Error::UnknownMergeStrategy {
                name: other.to_string(),
            }),
        }
    }
}

/// How two sequences at the same key are combined during a deep merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrayMergeMode {
    /// Earlier items followed by later items.
    #[default]
    Append,
    /// Like `Append`, skipping items structurally equal to one already present.
    AppendUnique,
    /// The later sequence replaces the earlier one.
    Replace,
}

impl FromStr for ArrayMergeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "append" => Ok(ArrayMergeMode::Append),
            "append-unique" => Ok(ArrayMergeMode::AppendUnique),
            "replace" => Ok(ArrayMergeMode::Replace),
            other => Err(Error::ConfigParse {
                message: format!("unknown array mode '{}'", other),
                hint: Some("expected one of: append, append-unique, replace".to_string()),
            }),
        }
    }
}

/// Bounds on dependency resolution.
///
/// Graph size is caller-controlled, so traversal is capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ResolverLimits {
    /// Maximum number of packs in the dependency graph.
    pub max_nodes: usize,
    /// Maximum dependency distance from a requested pack.
    pub max_depth: usize,
}

impl ResolverLimits {
    pub const DEFAULT_MAX_NODES: usize = 1000;
    pub const DEFAULT_MAX_DEPTH: usize = 64;
}

impl Default for ResolverLimits {
    fn default() -> Self {
        Self {
            max_nodes: Self::DEFAULT_MAX_NODES,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Options for a single combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CombinationOptions {
    pub strategy: MergeStrategyKind,
    /// Dot paths (with `*` segments) where the later value wins outright.
    /// Only read by the selective strategy.
    pub override_paths: Option<Vec<String>>,
    /// Dot paths (with `*` segments) that are always merged.
    /// Only read by the selective strategy.
    pub merge_paths: Option<Vec<String>>,
    pub validate: bool,
    pub resolve_dependencies: bool,
    pub array_mode: ArrayMergeMode,
    pub limits: ResolverLimits,
}

impl Default for CombinationOptions {
    fn default() -> Self {
        Self {
            strategy: MergeStrategyKind::DeepMerge,
            override_paths: None,
            merge_paths: None,
            validate: true,
            resolve_dependencies: true,
            array_mode: ArrayMergeMode::Append,
            limits: ResolverLimits::default(),
        }
    }
}

impl CombinationOptions {
    pub fn with_strategy(mut self, strategy: MergeStrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Select the selective strategy with the given path lists.
    pub fn selective<I, J, S, T>(override_paths: I, merge_paths: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            strategy: MergeStrategyKind::Selective,
            override_paths: Some(override_paths.into_iter().map(Into::into).collect()),
            merge_paths: Some(merge_paths.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn with_array_mode(mut self, mode: ArrayMergeMode) -> Self {
        self.array_mode = mode;
        self
    }

    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn with_resolve_dependencies(mut self, resolve: bool) -> Self {
        self.resolve_dependencies = resolve;
        self
    }

    pub fn with_limits(mut self, limits: ResolverLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Parse combination options from a YAML string.
///
/// An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<CombinationOptions> {
    if yaml_content.trim().is_empty() {
        return Ok(CombinationOptions::default());
    }

    serde_yaml::from_str::<CombinationOptions>(yaml_content).map_err(|err| {
        let message = err.to_string();
        let hint = if message.contains("unknown variant") {
            Some("strategy must be one of: deep-merge, override, selective".to_string())
        } else if message.contains("unknown field") {
            Some(
                "valid keys are: strategy, override-paths, merge-paths, validate, \
                 resolve-dependencies, array-mode, limits"
                    .to_string(),
            )
        } else {
            None
        };
        Error::ConfigParse { message, hint }
    })
}

/// Load combination options from a YAML file.
pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<CombinationOptions> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CombinationOptions::default();
        assert_eq!(options.strategy, MergeStrategyKind::DeepMerge);
        assert!(options.validate);
        assert!(options.resolve_dependencies);
        assert_eq!(options.array_mode, ArrayMergeMode::Append);
        assert_eq!(options.limits.max_nodes, 1000);
        assert_eq!(options.limits.max_depth, 64);
        assert!(options.override_paths.is_none());
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "deep-merge".parse::<MergeStrategyKind>().unwrap(),
            MergeStrategyKind::DeepMerge
        );
        assert_eq!(
            "override".parse::<MergeStrategyKind>().unwrap(),
            MergeStrategyKind::Override
        );
        assert_eq!(
            "selective".parse::<MergeStrategyKind>().unwrap(),
            MergeStrategyKind::Selective
        );
    }

    #[test]
    fn test_strategy_from_str_unknown() {
        let err = "shuffle".parse::<MergeStrategyKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownMergeStrategy { ref name } if name == "shuffle"));
    }

    #[test]
    fn test_strategy_display_roundtrips_name() {
        for kind in [
            MergeStrategyKind::DeepMerge,
            MergeStrategyKind::Override,
            MergeStrategyKind::Selective,
        ] {
            assert_eq!(kind.to_string().parse::<MergeStrategyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(parse("").unwrap(), CombinationOptions::default());
    }

    #[test]
    fn test_parse_selective_options() {
        let yaml = r#"
strategy: selective
override-paths: ["service.name"]
merge-paths: ["checks.*"]
array-mode: append-unique
validate: false
limits:
  max-nodes: 10
"#;
        let options = parse(yaml).unwrap();
        assert_eq!(options.strategy, MergeStrategyKind::Selective);
        assert_eq!(
            options.override_paths,
            Some(vec!["service.name".to_string()])
        );
        assert_eq!(options.merge_paths, Some(vec!["checks.*".to_string()]));
        assert_eq!(options.array_mode, ArrayMergeMode::AppendUnique);
        assert!(!options.validate);
        assert!(options.resolve_dependencies);
        assert_eq!(options.limits.max_nodes, 10);
        assert_eq!(options.limits.max_depth, ResolverLimits::DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_parse_unknown_strategy_has_hint() {
        let err = parse("strategy: shuffle\n").unwrap_err();
        match err {
            Error::ConfigParse { hint, .. } => {
                assert!(hint.unwrap().contains("deep-merge"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_unknown_field_rejected() {
        let err = parse("strategyy: override\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { hint: Some(_), .. }));
    }

    #[test]
    fn test_array_mode_from_str() {
        assert_eq!(
            "append-unique".parse::<ArrayMergeMode>().unwrap(),
            ArrayMergeMode::AppendUnique
        );
        assert!("sorted".parse::<ArrayMergeMode>().is_err());
    }

    #[test]
    fn test_selective_constructor() {
        let options = CombinationOptions::selective(["a.b"], Vec::<String>::new());
        assert_eq!(options.strategy, MergeStrategyKind::Selective);
        assert_eq!(options.override_paths, Some(vec!["a.b".to_string()]));
        assert_eq!(options.merge_paths, Some(Vec::new()));
    }
}
