//! # Combine Command Implementation
//!
//! This module implements the `combine` subcommand, which merges packs from a
//! catalog directory into a single combined pack.
//!
//! ## Process
//!
//! 1.  **Load Catalog**: Every pack directory under `--catalog` is read.
//! 2.  **Build Options**: Options come from `--options` (if given) and are then
//!     overridden by individual flags.
//! 3.  **Combine**: The requested names are looked up in the catalog and
//!     combined, pulling in dependencies from the catalog.
//! 4.  **Output**: The combined pack is written as YAML or JSON to stdout or
//!     `--output`. Errors and warnings go to stderr.
//!
//! A failed combination exits with a non-zero status and writes nothing.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::fs;
use std::path::PathBuf;

use pack_combiner::combiner::PackCombiner;
use pack_combiner::config::{self, ArrayMergeMode, CombinationOptions, MergeStrategyKind};
use pack_combiner::output::{emoji, render_diagnostics, OutputConfig};
use pack_combiner::pack::CombinedPack;

/// Combine packs from a catalog into a single pack
#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Names of the packs to combine.
    #[arg(required = true, value_name = "PACK")]
    pub packs: Vec<String>,

    /// Directory containing one subdirectory per pack.
    #[arg(short, long, value_name = "DIR", default_value = ".", env = "PACK_COMBINER_CATALOG")]
    pub catalog: PathBuf,

    /// Merge strategy (deep-merge, override, selective).
    #[arg(short, long, value_name = "STRATEGY")]
    pub strategy: Option<MergeStrategyKind>,

    /// Dot-path pattern whose value the later pack replaces (selective only).
    #[arg(long = "override-path", value_name = "PATTERN")]
    pub override_paths: Vec<String>,

    /// Dot-path pattern whose values are merged (selective only).
    #[arg(long = "merge-path", value_name = "PATTERN")]
    pub merge_paths: Vec<String>,

    /// How arrays at the same key are merged (append, append-unique, replace).
    #[arg(long, value_name = "MODE")]
    pub array_mode: Option<ArrayMergeMode>,

    /// Skip validation of the combined pack.
    #[arg(long)]
    pub no_validate: bool,

    /// Merge only the named packs, in the order given.
    #[arg(long)]
    pub no_resolve: bool,

    /// YAML file with combination options. Flags take precedence.
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Output format for the combined pack.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Write the combined pack to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Execute the `combine` command.
pub fn execute(args: CombineArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let catalog = super::load_catalog(&args.catalog)?;
    let options = build_options(&args)?;

    let result = PackCombiner::new().combine_by_name(&args.packs, &catalog, &options);
    eprint!("{}", render_diagnostics(&out, &result.errors, &result.warnings));

    let combined = match result.combined_pack {
        Some(combined) if result.success => combined,
        _ => anyhow::bail!("Combination failed with {} error(s)", result.errors.len()),
    };

    let rendered = render(&combined, args.format)?;
    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} to {}",
                emoji(&out, "✅", "[OK]"),
                combined.manifest.name,
                path.display()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Start from the options file (or defaults) and apply flag overrides.
fn build_options(args: &CombineArgs) -> Result<CombinationOptions> {
    let mut options = match &args.options {
        Some(path) => config::from_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => CombinationOptions::default(),
    };

    if let Some(strategy) = args.strategy {
        options.strategy = strategy;
    }
    if !args.override_paths.is_empty() {
        options.override_paths = Some(args.override_paths.clone());
    }
    if !args.merge_paths.is_empty() {
        options.merge_paths = Some(args.merge_paths.clone());
    }
    if let Some(mode) = args.array_mode {
        options.array_mode = mode;
    }
    if args.no_validate {
        options.validate = false;
    }
    if args.no_resolve {
        options.resolve_dependencies = false;
    }

    Ok(options)
}

fn render(combined: &CombinedPack, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(combined)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(combined)?;
            json.push('\n');
            json
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: CombineArgs,
    }

    fn parse(argv: &[&str]) -> CombineArgs {
        let mut full = vec!["combine"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn test_flags_build_selective_options() {
        let args = parse(&[
            "a",
            "b",
            "--strategy",
            "selective",
            "--override-path",
            "service.name",
            "--merge-path",
            "checks.*",
            "--array-mode",
            "append-unique",
        ]);

        let options = build_options(&args).unwrap();

        assert_eq!(options.strategy, MergeStrategyKind::Selective);
        assert_eq!(options.override_paths, Some(vec!["service.name".to_string()]));
        assert_eq!(options.merge_paths, Some(vec!["checks.*".to_string()]));
        assert_eq!(options.array_mode, ArrayMergeMode::AppendUnique);
        assert!(options.validate);
    }

    #[test]
    fn test_flags_override_options_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("options.yaml");
        fs::write(&path, "strategy: override\nvalidate: false\n").unwrap();

        let args = parse(&[
            "a",
            "--options",
            path.to_str().unwrap(),
            "--strategy",
            "deep-merge",
            "--no-resolve",
        ]);
        let options = build_options(&args).unwrap();

        assert_eq!(options.strategy, MergeStrategyKind::DeepMerge);
        assert!(!options.validate);
        assert!(!options.resolve_dependencies);
    }

    #[test]
    fn test_unknown_strategy_rejected_by_parser() {
        let result = TestCli::try_parse_from(["combine", "a", "--strategy", "clobber"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_options_file() {
        let args = parse(&["a", "--options", "/nonexistent/options.yaml"]);
        let err = build_options(&args).unwrap_err();
        assert!(err.to_string().contains("Failed to load options"));
    }
}
