//! Post-merge validation of a combined pack.
//!
//! Structural problems (missing name, version or source list, non-mapping
//! template) are errors. An empty template and a `combination_order` that
//! disagrees with `manifest.combined_from` are warnings.

use log::warn;

use crate::error::Error;
use crate::merge::value_type_name;
use crate::pack::CombinedPack;

/// Findings from [`validate_combined`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(
            Error::CombinedPackValidation {
                message: message.into(),
            }
            .to_string(),
        );
    }

    fn warning(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }
}

pub fn validate_combined(combined: &CombinedPack) -> ValidationReport {
    let mut report = ValidationReport::default();
    let manifest = &combined.manifest;

    if manifest.name.trim().is_empty() {
        report.error("manifest is missing a name");
    }
    if manifest.version.trim().is_empty() {
        report.error("manifest is missing a version");
    }
    if manifest.combined_from.is_empty() {
        report.error("manifest does not list any source packs in combinedFrom");
    }

    match combined.template.as_object() {
        None => report.error(format!(
            "template must be a mapping, got {}",
            value_type_name(&combined.template)
        )),
        Some(map) if map.is_empty() => {
            report.warning("Combined template is empty".to_string());
        }
        Some(_) => {}
    }

    if combined.combination_order != manifest.combined_from {
        report.warning(format!(
            "Combination order [{}] does not match manifest combinedFrom [{}]",
            combined.combination_order.join(", "),
            manifest.combined_from.join(", ")
        ));
    }

    report
}
