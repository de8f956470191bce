//! CLI definitions and entry point.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Entity-count scaling harness for an external particle simulation engine
#[derive(Parser, Debug)]
#[command(name = "simscale", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one or more scaling sweeps and render the results chart
    Run(RunArgs),

    /// Materialize one case's artifacts for inspection (never deleted)
    Materialize(MaterializeArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the release engine binary
    #[arg(long)]
    pub engine: Option<PathBuf>,

    /// Build the engine (cargo build --release) before sweeping
    #[arg(long)]
    pub build: bool,

    /// Directory in which to run the engine build (default: cwd)
    #[arg(long, requires = "build")]
    pub engine_dir: Option<PathBuf>,

    /// Seed entity count; doubled before the first case
    #[arg(long)]
    pub seed_entities: Option<u64>,

    /// Step counts, comma-separated; one sweep per value
    #[arg(long, value_delimiter = ',')]
    pub steps: Vec<u64>,

    /// Entity-count ceiling; the sweep stops before exceeding it
    #[arg(long)]
    pub max_entities: Option<u64>,

    /// Root directory for per-case workspaces (default: system temp dir)
    #[arg(long)]
    pub workspace_root: Option<PathBuf>,

    /// Preserve per-case workspaces instead of deleting them
    #[arg(long)]
    pub keep_workspaces: bool,

    /// Chart output path
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MaterializeArgs {
    /// Entity count for the case
    #[arg(long)]
    pub entities: u64,

    /// Step count for the case
    #[arg(long)]
    pub steps: u64,

    /// Directory to materialize into (default: system temp dir, using the
    /// deterministic per-case name)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}
