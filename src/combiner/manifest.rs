//! Combined manifest synthesis.

use std::collections::HashSet;

use serde_json::Value;

use crate::pack::{CombinedManifest, CombinedPack, DependencyRef, Pack};

/// Version assigned to every freshly combined pack.
pub const COMBINED_VERSION: &str = "1.0.0";

/// Prefix of every combined pack name.
pub const COMBINED_NAME_PREFIX: &str = "combined-";

/// Build the combined pack for `sources` (in load order) and the merged
/// `template`.
pub fn synthesize(sources: &[&Pack], template: Value) -> CombinedPack {
    let names: Vec<String> = sources.iter().map(|p| p.name().to_string()).collect();

    let manifest = CombinedManifest {
        name: format!("{}{}", COMBINED_NAME_PREFIX, names.join("-")),
        version: COMBINED_VERSION.to_string(),
        display_name: sources
            .iter()
            .map(|p| p.manifest.display_name.as_str())
            .collect::<Vec<_>>()
            .join(" + "),
        description: sources
            .iter()
            .map(|p| p.manifest.description.as_str())
            .collect::<Vec<_>>()
            .join(" | "),
        author: combined_author(sources),
        combined_from: names,
    };

    CombinedPack::new(manifest, template, merge_dependencies(sources))
}

/// Union of every source's dependencies, keeping the first version seen for
/// each name.
pub fn merge_dependencies(sources: &[&Pack]) -> Vec<DependencyRef> {
    let mut seen = HashSet::new();
    sources
        .iter()
        .flat_map(|pack| pack.dependencies())
        .filter(|dep| seen.insert(dep.name.as_str()))
        .cloned()
        .collect()
}

/// Distinct authors in load order, comma separated.
fn combined_author(sources: &[&Pack]) -> Option<String> {
    let mut seen = HashSet::new();
    let authors: Vec<&str> = sources
        .iter()
        .filter_map(|pack| pack.manifest.author.as_deref())
        .filter(|author| seen.insert(*author))
        .collect();

    if authors.is_empty() {
        None
    } else {
        Some(authors.join(", "))
    }
}
