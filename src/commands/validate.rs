//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a pack's
//! declared dependencies against a catalog without combining anything.
//!
//! ## Functionality
//!
//! - **Dependency Presence**: Every declared dependency must exist in the
//!   catalog.
//! - **Version Check**: A dependency whose catalog version differs from the
//!   declared one is a warning.
//! - **Resolution Check**: The full dependency graph is resolved so cycles
//!   and transitive gaps are reported.
//! - **Transitive Listing**: Prints every pack the pack depends on, directly
//!   or indirectly.
//!
//! With `--strict`, warnings fail validation as well.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use pack_combiner::output::{emoji, OutputConfig};
use pack_combiner::resolver::DependencyResolver;

/// Validate the declared dependencies of a pack
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Name of the pack to validate.
    #[arg(value_name = "PACK")]
    pub pack: String,

    /// Directory containing one subdirectory per pack.
    #[arg(short, long, value_name = "DIR", default_value = ".", env = "PACK_COMBINER_CATALOG")]
    pub catalog: PathBuf,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let catalog = super::load_catalog(&args.catalog)?;
    let pack = super::select_packs(&[&args.pack], &catalog)?.remove(0);

    println!(
        "{} Validating pack: {} @ {}",
        emoji(&out, "🔍", "[SCAN]"),
        pack.name(),
        pack.version()
    );

    let resolver = DependencyResolver::new();
    let mut has_errors = false;
    let mut has_warnings = false;

    // Declared dependencies
    println!(
        "\n{} Checking declared dependencies...",
        emoji(&out, "🔄", "[CHECK]")
    );
    let validation = resolver.validate_dependencies(&pack, &catalog);
    for error in &validation.errors {
        println!("{} {}", emoji(&out, "❌", "[ERR]"), error);
        has_errors = true;
    }
    for warning in &validation.warnings {
        println!("{} {}", emoji(&out, "⚠️", "[WARN]"), warning);
        has_warnings = true;
    }
    if validation.valid && validation.warnings.is_empty() {
        println!(
            "{} {} declared dependencies found",
            emoji(&out, "✅", "[OK]"),
            pack.dependencies().len()
        );
    }

    // Full resolution
    println!(
        "\n{} Resolving dependency graph...",
        emoji(&out, "🔄", "[CHECK]")
    );
    let resolution = resolver.resolve(std::slice::from_ref(&pack), &catalog);
    if resolution.success {
        println!(
            "{} Resolved {} packs without cycles",
            emoji(&out, "✅", "[OK]"),
            resolution.load_order.len()
        );
    } else {
        for error in &resolution.errors {
            println!("{} {}", emoji(&out, "❌", "[ERR]"), error);
        }
        has_errors = true;
    }

    // Transitive dependencies
    let transitive = resolver.get_transitive_dependencies(pack.name(), &catalog);
    println!(
        "\n{} Transitive dependencies ({}):",
        emoji(&out, "📊", "[INFO]"),
        transitive.len()
    );
    for name in &transitive {
        println!("   {}", name);
    }

    // Final result
    println!("\n{} Validation Result:", emoji(&out, "🎯", "[RESULT]"));

    if has_errors {
        println!(
            "{} Pack has errors that must be fixed",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(anyhow::anyhow!("Pack validation failed"));
    }

    if has_warnings && args.strict {
        println!(
            "{} Pack has warnings (strict mode enabled)",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(anyhow::anyhow!("Pack validation failed in strict mode"));
    }

    if has_warnings {
        println!(
            "{} Pack is valid but has warnings",
            emoji(&out, "⚠️", "[WARN]")
        );
    } else {
        println!("{} Pack is valid", emoji(&out, "✅", "[OK]"));
    }

    Ok(())
}
