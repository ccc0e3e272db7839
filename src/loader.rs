//! # Pack Loading
//!
//! Reads domain packs from disk for the command-line tool. A pack is a
//! directory holding:
//!
//! - `manifest.yaml` (or `.yml` / `.json`) - required, a [`PackManifest`]
//! - `template.yaml` (or `.yml` / `.json`) - required, a mapping
//! - `schema.json` (or `.yaml` / `.yml`) - optional, kept opaque
//!
//! A catalog is a directory whose immediate subdirectories are packs.
//! Subdirectories without a manifest are skipped, so a catalog can sit next
//! to unrelated files.
//!
//! Loading does no validation beyond parsing, with two exceptions: pack names
//! must be unique within a catalog, and YAML `.inf`/`.nan` are rejected since
//! templates have no way to hold them. The combiner decides what a usable
//! template is.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::pack::{Pack, PackManifest};

const MANIFEST_FILES: &[&str] = &["manifest.yaml", "manifest.yml", "manifest.json"];
const TEMPLATE_FILES: &[&str] = &["template.yaml", "template.yml", "template.json"];
const SCHEMA_FILES: &[&str] = &["schema.json", "schema.yaml", "schema.yml"];

/// Load the pack stored in `dir`.
///
/// # Errors
///
/// Returns `Error::PackLoad` if the manifest or template is missing or cannot
/// be parsed.
pub fn load_pack<P: AsRef<Path>>(dir: P) -> Result<Pack> {
    let dir = dir.as_ref();

    let manifest_path = find_file(dir, MANIFEST_FILES).ok_or_else(|| Error::PackLoad {
        path: dir.display().to_string(),
        message: "no manifest.yaml, manifest.yml or manifest.json found".to_string(),
    })?;
    let manifest: PackManifest = read_document(&manifest_path)?;

    let template_path = find_file(dir, TEMPLATE_FILES).ok_or_else(|| Error::PackLoad {
        path: dir.display().to_string(),
        message: "no template.yaml, template.yml or template.json found".to_string(),
    })?;
    let template: Value = read_document(&template_path)?;

    let schema = match find_file(dir, SCHEMA_FILES) {
        Some(path) => read_document(&path)?,
        None => Value::Null,
    };

    debug!(
        "Loaded pack '{}@{}' from {}",
        manifest.name,
        manifest.version,
        dir.display()
    );

    Ok(Pack {
        manifest,
        schema,
        template,
    })
}

/// Load every pack directly under `root`, sorted by directory name.
///
/// # Errors
///
/// Returns `Error::Io` if `root` cannot be read, the first pack load error, or
/// `Error::PackLoad` when two packs share a name.
pub fn load_catalog<P: AsRef<Path>>(root: P) -> Result<Vec<Pack>> {
    let root = root.as_ref();
    let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir() && find_file(path, MANIFEST_FILES).is_some())
        .collect();
    dirs.sort();

    let mut seen: HashMap<String, &PathBuf> = HashMap::new();
    let mut packs = Vec::with_capacity(dirs.len());
    for dir in &dirs {
        let pack = load_pack(dir)?;
        if let Some(first) = seen.insert(pack.name().to_string(), dir) {
            return Err(Error::PackLoad {
                path: dir.display().to_string(),
                message: format!(
                    "pack name '{}' is already used by {}",
                    pack.name(),
                    first.display()
                ),
            });
        }
        packs.push(pack);
    }

    Ok(packs)
}

fn find_file(dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");

    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|err| err.to_string())
    } else {
        parse_yaml(&content)
    };

    parsed.map_err(|message| Error::PackLoad {
        path: path.display().to_string(),
        message,
    })
}

/// Parse YAML, rejecting `.inf` and `.nan`, which have no JSON form.
fn parse_yaml<T: DeserializeOwned>(content: &str) -> std::result::Result<T, String> {
    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|err| err.to_string())?;
    if let Some(at) = find_non_finite(&value, "") {
        return Err(format!("non-finite number at '{}'", at));
    }
    serde_yaml::from_value(value).map_err(|err| err.to_string())
}

/// Dot path of the first non-finite float in `value`.
fn find_non_finite(value: &serde_yaml::Value, path: &str) -> Option<String> {
    match value {
        serde_yaml::Value::Number(n) if n.as_f64().is_some_and(|f| !f.is_finite()) => {
            Some(if path.is_empty() { ".".to_string() } else { path.to_string() })
        }
        serde_yaml::Value::Sequence(items) => items
            .iter()
            .enumerate()
            .find_map(|(idx, item)| find_non_finite(item, &join_key(path, &idx.to_string()))),
        serde_yaml::Value::Mapping(map) => map.iter().find_map(|(key, item)| {
            let key = key.as_str().map(str::to_string).unwrap_or_else(|| format!("{:?}", key));
            find_non_finite(item, &join_key(path, &key))
        }),
        serde_yaml::Value::Tagged(tagged) => find_non_finite(&tagged.value, path),
        _ => None,
    }
}

fn join_key(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}
