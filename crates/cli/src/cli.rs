use std::path::PathBuf;

use clap::Parser;
use diagnoser_core::OutputFormat;

/// Rank likely root causes for a failing data-orchestration deployment.
///
/// Reads a collector snapshot dump (JSON or YAML, by extension) and prints
/// the ranked hypotheses. Without `--snapshot`, a JSON dump is read from stdin.
#[derive(Parser, Debug)]
#[command(name = "fluid-diag", about = "Rule-based failure diagnosis for Fluid deployments")]
pub struct CliArgs {
    /// Snapshot dump to diagnose (.json, .yml, .yaml)
    #[arg(long, env = "DIAGNOSER_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Output format: json, yaml, or text (overrides DIAGNOSER_OUTPUT)
    #[arg(long)]
    pub output: Option<OutputFormat>,

    /// Evaluate rules on a rayon pool (overrides DIAGNOSER_PARALLEL)
    #[arg(long)]
    pub parallel: bool,

    /// Worker threads for parallel mode (overrides DIAGNOSER_THREADS)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Print the registered rules and exit
    #[arg(long)]
    pub list_rules: bool,
}
