//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Pack Combiner - Resolve and merge versioned domain packs
#[derive(Parser, Debug)]
#[command(name = "pack-combiner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Combine packs from a catalog into a single pack
    Combine(commands::combine::CombineArgs),

    /// Show the load order for packs without merging them
    Preview(commands::preview::PreviewArgs),

    /// Display the dependency tree of a pack
    Tree(commands::tree::TreeArgs),

    /// Validate the declared dependencies of a pack
    Validate(commands::validate::ValidateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Combine(args) => commands::combine::execute(args, &self.color),
            Commands::Preview(args) => commands::preview::execute(args, &self.color),
            Commands::Tree(args) => commands::tree::execute(args),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
        }
    }
}

/// Install `env_logger` with `level` as the default filter. `RUST_LOG` wins
/// when it is set.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A second initialization only happens in tests; ignore it.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_log_level_is_warn() {
        let cli = Cli::try_parse_from(["pack-combiner", "preview", "base"]).unwrap();
        assert_eq!(cli.log_level, "warn");
        assert_eq!(cli.color, "auto");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pack-combiner",
            "tree",
            "base",
            "--color",
            "never",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.color, "never");
        assert_eq!(cli.log_level, "debug");
    }
}
