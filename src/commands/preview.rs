//! # Preview Command Implementation
//!
//! This module implements the `preview` subcommand, which resolves the
//! dependencies of the requested packs and prints the resulting load order
//! without merging any templates.
//!
//! Missing or mismatched dependencies are reported as warnings. A resolution
//! failure, such as a cycle, exits with a non-zero status.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use pack_combiner::combiner::PackCombiner;
use pack_combiner::config::CombinationOptions;
use pack_combiner::output::{emoji, render_diagnostics, render_load_order, OutputConfig};

/// Show the load order for packs without merging them
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Names of the packs to preview.
    #[arg(required = true, value_name = "PACK")]
    pub packs: Vec<String>,

    /// Directory containing one subdirectory per pack.
    #[arg(short, long, value_name = "DIR", default_value = ".", env = "PACK_COMBINER_CATALOG")]
    pub catalog: PathBuf,
}

/// Execute the `preview` command.
pub fn execute(args: PreviewArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let catalog = super::load_catalog(&args.catalog)?;
    let packs = super::select_packs(&args.packs, &catalog)?;

    let preview = PackCombiner::new().preview(&packs, &catalog, &CombinationOptions::default());

    eprint!(
        "{}",
        render_diagnostics(&out, &preview.dependencies.errors, &preview.warnings)
    );
    if !preview.dependencies.success {
        anyhow::bail!("Dependency resolution failed");
    }

    println!(
        "{} Load order for {}:",
        emoji(&out, "📦", "[ORDER]"),
        args.packs.join(", ")
    );
    print!("{}", render_load_order(&preview.load_order));

    Ok(())
}
