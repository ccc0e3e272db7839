//! # Pack Data Model
//!
//! Domain packs are the unit of combination. A pack bundles a manifest (name,
//! version, display metadata, and declared dependencies), an opaque validation
//! schema, and a template: an arbitrary nested mapping that merge strategies
//! fold together.
//!
//! Templates are represented as `serde_json::Value`. Object keys are kept in
//! sorted order by `serde_json::Map`, which makes every merge result
//! deterministic regardless of how the input mapping was written.
//!
//! A `CombinedPack` is the output of a combination. Its manifest records the
//! source packs it was built from, and its `combination_order` is derived from
//! the same list at construction time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A reference from one pack to another.
///
/// Resolution matches on `name` only; `version` is informational and used for
/// mismatch warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRef {
    /// Name of the required pack.
    pub name: String,
    /// Version the dependent pack was written against.
    pub version: String,
}

impl DependencyRef {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Manifest metadata for a single domain pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackManifest {
    pub name: String,
    pub version: String,
    pub display_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyRef>,
}

/// A loaded domain pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub manifest: PackManifest,
    /// Validation schema for the template. Opaque to the combiner.
    #[serde(default)]
    pub schema: Value,
    /// Template fragment merged into the combined pack.
    pub template: Value,
}

impl Pack {
    /// Create a pack with an empty schema and template.
    ///
    /// Display name and description default to the pack name.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            manifest: PackManifest {
                display_name: name.clone(),
                description: format!("{} domain pack", name),
                name,
                version: version.into(),
                author: None,
                dependencies: Vec::new(),
            },
            schema: Value::Null,
            template: Value::Object(serde_json::Map::new()),
        }
    }

    /// Add a dependency on another pack.
    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.manifest
            .dependencies
            .push(DependencyRef::new(name, version));
        self
    }

    /// Replace the template.
    pub fn with_template(mut self, template: Value) -> Self {
        self.template = template;
        self
    }

    /// Replace the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.manifest.display_name = display_name.into();
        self
    }

    /// Replace the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.manifest.description = description.into();
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.manifest.author = Some(author.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    pub fn version(&self) -> &str {
        &self.manifest.version
    }

    pub fn dependencies(&self) -> &[DependencyRef] {
        &self.manifest.dependencies
    }
}

/// Manifest synthesized for a combined pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedManifest {
    pub name: String,
    pub version: String,
    pub display_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Source pack names in load order.
    pub combined_from: Vec<String>,
}

/// The single artifact produced by combining an ordered set of packs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedPack {
    pub manifest: CombinedManifest,
    pub template: Value,
    /// Union of source dependencies, first-seen version wins.
    pub dependencies: Vec<DependencyRef>,
    pub combination_order: Vec<String>,
}

impl CombinedPack {
    /// Build a combined pack whose `combination_order` mirrors
    /// `manifest.combined_from`.
    pub fn new(manifest: CombinedManifest, template: Value, dependencies: Vec<DependencyRef>) -> Self {
        let combination_order = manifest.combined_from.clone();
        Self {
            manifest,
            template,
            dependencies,
            combination_order,
        }
    }
}
