//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a catalog fixture and pack builders to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = CatalogFixture::new().with_standard_catalog();
//!     fixture.command().arg("preview").arg("app").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

use pack_combiner::pack::Pack;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{pack, templates, CatalogFixture};
}

/// Template snippets for the standard catalog.
#[allow(dead_code)]
pub mod templates {
    pub const BASE: &str = r#"
service:
  name: base
  replicas: 1
checks:
  - lint
labels:
  tier: shared
"#;

    pub const SECURITY: &str = r#"
checks:
  - lint
  - audit
labels:
  owner: security
"#;

    pub const API: &str = r#"
service:
  name: api
  port: 8080
checks:
  - contract-tests
"#;

    pub const APP: &str = r#"
service:
  replicas: 3
labels:
  tier: frontend
"#;
}

/// Build an in-memory pack with `deps` at version 1.0.0.
#[allow(dead_code)]
pub fn pack(name: &str, deps: &[&str], template: serde_json::Value) -> Pack {
    deps.iter()
        .fold(Pack::new(name, "1.0.0"), |p, dep| p.with_dependency(*dep, "1.0.0"))
        .with_template(template)
}

/// A temporary catalog directory with one subdirectory per pack.
pub struct CatalogFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl CatalogFixture {
    /// Create a fixture with an empty catalog.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a pack directory with a YAML manifest and template.
    pub fn with_pack(self, name: &str, version: &str, deps: &[(&str, &str)], template: &str) -> Self {
        let mut manifest = format!(
            "name: {name}\nversion: {version}\ndisplayName: {display}\ndescription: {name} conventions\n",
            display = display_name(name)
        );
        if !deps.is_empty() {
            manifest.push_str("dependencies:\n");
            for (dep, dep_version) in deps {
                manifest.push_str(&format!("  - name: {dep}\n    version: {dep_version}\n"));
            }
        }

        self.temp_dir
            .child(name)
            .child("manifest.yaml")
            .write_str(&manifest)
            .expect("Failed to write manifest");
        self.temp_dir
            .child(name)
            .child("template.yaml")
            .write_str(template)
            .expect("Failed to write template");
        self
    }

    /// Add `base`, `security`, `api`, and `app`.
    ///
    /// `app` depends on `api` and `security`, both of which depend on `base`.
    pub fn with_standard_catalog(self) -> Self {
        self.with_pack("base", "1.0.0", &[], templates::BASE)
            .with_pack("security", "1.0.0", &[("base", "1.0.0")], templates::SECURITY)
            .with_pack("api", "1.0.0", &[("base", "1.0.0")], templates::API)
            .with_pack(
                "app",
                "1.0.0",
                &[("api", "1.0.0"), ("security", "1.0.0")],
                templates::APP,
            )
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the catalog directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the catalog directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command with `--catalog` pointing at this fixture.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pack-combiner");
        cmd.current_dir(self.path())
            .env_remove("PACK_COMBINER_CATALOG")
            .env_remove("RUST_LOG")
            .arg("--color=never");
        cmd
    }
}

impl Default for CatalogFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = CatalogFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_standard_catalog_loads() {
        let fixture = CatalogFixture::new().with_standard_catalog();
        let catalog = pack_combiner::loader::load_catalog(fixture.path()).unwrap();
        let names: Vec<&str> = catalog.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["api", "app", "base", "security"]);
        assert_eq!(catalog[1].manifest.display_name, "App");
    }

    #[test]
    fn test_templates_are_valid_yaml() {
        for template in [templates::BASE, templates::SECURITY, templates::API, templates::APP] {
            serde_yaml::from_str::<serde_yaml::Value>(template).expect("template should be valid YAML");
        }
    }
}
