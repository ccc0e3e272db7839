//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `pack-combiner` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! Every command reads packs from a catalog directory with
//! [`pack_combiner::loader::load_catalog`] and calls into the library for the
//! actual work.

pub mod combine;
pub mod preview;
pub mod tree;
pub mod validate;

use anyhow::{Context, Result};
use std::path::Path;

use pack_combiner::loader;
use pack_combiner::pack::Pack;

/// Load every pack in `catalog`, adding the path to any error.
pub(crate) fn load_catalog(catalog: &Path) -> Result<Vec<Pack>> {
    loader::load_catalog(catalog)
        .with_context(|| format!("Failed to load pack catalog from {}", catalog.display()))
}

/// Look each of `names` up in `catalog`, failing with every missing name.
pub(crate) fn select_packs<S: AsRef<str>>(names: &[S], catalog: &[Pack]) -> Result<Vec<Pack>> {
    let mut found = Vec::with_capacity(names.len());
    let mut missing = Vec::new();
    for name in names {
        let name = name.as_ref();
        match catalog.iter().find(|pack| pack.name() == name) {
            Some(pack) => found.push(pack.clone()),
            None => missing.push(name),
        }
    }

    if !missing.is_empty() {
        anyhow::bail!("Packs not found: {}", missing.join(", "));
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_packs_reports_all_missing() {
        let catalog = vec![Pack::new("base", "1.0.0")];
        let err = select_packs(&["ghost", "base", "phantom"], &catalog).unwrap_err();
        assert_eq!(err.to_string(), "Packs not found: ghost, phantom");
    }

    #[test]
    fn test_select_packs_keeps_request_order() {
        let catalog = vec![Pack::new("a", "1.0.0"), Pack::new("b", "1.0.0")];
        let packs = select_packs(&["b", "a"], &catalog).unwrap();
        let names: Vec<&str> = packs.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_load_catalog_missing_dir_has_context() {
        let err = load_catalog(Path::new("/nonexistent/catalog")).unwrap_err();
        assert!(err.to_string().contains("Failed to load pack catalog"));
    }
}
