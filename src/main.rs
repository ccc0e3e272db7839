//! # Pack Combiner CLI
//!
//! This is the binary entry point for the `pack-combiner` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Installing the logger according to `--log-level` and `RUST_LOG`.
//! - Executing the appropriate command and translating library failures into
//!   a non-zero exit status.
//!
//! The combination logic lives in the `pack_combiner` library crate; the binary
//! only loads packs from disk and presents results.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
