//! Pack combination.
//!
//! [`PackCombiner`] ties resolution and merging together:
//!
//! 1. **Input check** - At least one pack must be supplied
//! 2. **Resolution** - Build the dependency graph, reject cycles and missing
//!    dependencies, compute the load order (skipped when
//!    `resolve_dependencies` is off; the packs are then merged as given)
//! 3. **Strategy selection** - Build the merge strategy named in the options
//! 4. **Merging** - Fold the templates in load order
//! 5. **Manifest synthesis** - Name, version, and source list for the result
//! 6. **Validation** - Structural checks on the combined pack (when `validate`
//!    is on); findings are added without discarding the pack
//!
//! Every failure along the way is reported on the returned
//! [`CombinationResult`]; nothing here returns `Err`. The combiner holds no
//! state, so one instance can serve any number of calls.

use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

use crate::config::CombinationOptions;
use crate::error::{Error, Result};
use crate::merge::create_strategy;
use crate::pack::{CombinedPack, Pack};
use crate::resolver::graph::pack_lookup;
use crate::resolver::{DependencyResolver, ResolvedDependencies};

pub mod manifest;
pub mod validation;

pub use validation::{validate_combined, ValidationReport};

/// Outcome of a combination.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationResult {
    /// True when `errors` is empty.
    pub success: bool,
    /// Present whenever merging completed, even if validation then failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_pack: Option<CombinedPack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_resolution: Option<ResolvedDependencies>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CombinationResult {
    fn failure(errors: Vec<String>, dependency_resolution: Option<ResolvedDependencies>) -> Self {
        Self {
            success: false,
            combined_pack: None,
            dependency_resolution,
            errors,
            warnings: Vec::new(),
        }
    }
}

/// Outcome of [`PackCombiner::preview`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResult {
    pub load_order: Vec<String>,
    pub dependencies: ResolvedDependencies,
    pub warnings: Vec<String>,
}

/// Combines domain packs into a single pack.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackCombiner;

impl PackCombiner {
    pub fn new() -> Self {
        Self
    }

    /// Combine `packs`, pulling dependencies from `available` as needed.
    pub fn combine(
        &self,
        packs: &[Pack],
        available: &[Pack],
        options: &CombinationOptions,
    ) -> CombinationResult {
        if packs.is_empty() {
            return CombinationResult::failure(vec![Error::EmptyInput.to_string()], None);
        }

        info!(
            "Combining {} pack(s) with strategy '{}'",
            packs.len(),
            options.strategy
        );

        let (ordered, resolution) = if options.resolve_dependencies {
            let resolution =
                DependencyResolver::with_limits(options.limits).resolve(packs, available);
            if !resolution.success {
                return CombinationResult::failure(resolution.errors.clone(), Some(resolution));
            }
            match map_load_order(&resolution.load_order, packs, available) {
                Ok(ordered) => (ordered, Some(resolution)),
                Err(err) => return CombinationResult::failure(vec![err.to_string()], Some(resolution)),
            }
        } else {
            (packs.iter().collect::<Vec<_>>(), None)
        };

        let strategy = match create_strategy(options) {
            Ok(strategy) => strategy,
            Err(err) => return CombinationResult::failure(vec![err.to_string()], resolution),
        };

        let templates: Vec<Value> = ordered.iter().map(|pack| pack.template.clone()).collect();
        debug!(
            "Merging {} template(s) with '{}'",
            templates.len(),
            strategy.name()
        );
        let template = match strategy.merge(&templates) {
            Ok(template) => template,
            Err(err) => {
                let err = match err {
                    Error::MergeExecution { .. } => err,
                    other => Error::MergeExecution {
                        message: other.to_string(),
                    },
                };
                return CombinationResult::failure(vec![err.to_string()], resolution);
            }
        };

        let combined = manifest::synthesize(&ordered, template);

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        if options.validate {
            let report = validate_combined(&combined);
            errors.extend(report.errors);
            warnings.extend(report.warnings);
        }

        info!(
            "Combined {} into '{}' ({} error(s), {} warning(s))",
            combined.manifest.combined_from.join(", "),
            combined.manifest.name,
            errors.len(),
            warnings.len()
        );

        CombinationResult {
            success: errors.is_empty(),
            combined_pack: Some(combined),
            dependency_resolution: resolution,
            errors,
            warnings,
        }
    }

    /// Look `names` up in `available` and combine the matches.
    ///
    /// Every name must be found; otherwise the missing names are reported
    /// together and nothing is combined.
    pub fn combine_by_name<S: AsRef<str>>(
        &self,
        names: &[S],
        available: &[Pack],
        options: &CombinationOptions,
    ) -> CombinationResult {
        let mut packs = Vec::with_capacity(names.len());
        let mut missing = Vec::new();

        for name in names {
            let name = name.as_ref();
            match available.iter().find(|pack| pack.name() == name) {
                Some(pack) => packs.push(pack.clone()),
                None => missing.push(name.to_string()),
            }
        }

        if !missing.is_empty() {
            return CombinationResult::failure(
                vec![format!("Packs not found: {}", missing.join(", "))],
                None,
            );
        }

        self.combine(&packs, available, options)
    }

    /// Compute the load order and check declared dependencies without
    /// merging anything.
    ///
    /// Missing or version-mismatched dependencies of the requested packs are
    /// reported as warnings; resolution failures are on `dependencies.errors`.
    pub fn preview(
        &self,
        packs: &[Pack],
        available: &[Pack],
        options: &CombinationOptions,
    ) -> PreviewResult {
        let resolver = DependencyResolver::with_limits(options.limits);
        let dependencies = resolver.resolve(packs, available);

        let mut warnings = Vec::new();
        for pack in packs {
            let validation = resolver.validate_dependencies(pack, available);
            warnings.extend(validation.errors);
            warnings.extend(validation.warnings);
        }

        PreviewResult {
            load_order: dependencies.load_order.clone(),
            dependencies,
            warnings,
        }
    }
}

/// Map resolved names back to pack values. Requested packs shadow catalog
/// packs, matching graph construction.
fn map_load_order<'a>(
    load_order: &[String],
    packs: &'a [Pack],
    available: &'a [Pack],
) -> Result<Vec<&'a Pack>> {
    let lookup = pack_lookup(packs, available);

    load_order
        .iter()
        .map(|name| {
            lookup
                .get(name.as_str())
                .copied()
                .ok_or_else(|| Error::UnmappedPack { name: name.clone() })
        })
        .collect()
}
