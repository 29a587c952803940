mod cli;
mod render;

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use diagnoser_core::config::{self, Config};
use diagnoser_core::{codec, EvaluationMode, Format, Snapshot};
use diagnoser_rules::{DiagnosisEngine, RuleRegistry};

use crate::cli::CliArgs;

fn main() -> Result<()> {
    config::load_dotenv();
    let args = CliArgs::parse();
    let mut config = Config::from_env();

    // Logs go to stderr; stdout carries only the rendered result.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(format) = args.output {
        config.output.format = format;
    }
    if args.parallel {
        config.engine.mode = EvaluationMode::Parallel;
    }
    if let Some(threads) = args.threads {
        config.engine.threads = threads;
    }
    config.log_summary();

    let engine = DiagnosisEngine::with_config(RuleRegistry::builtin(), &config.engine);
    if args.list_rules {
        print!("{}", render::render_rules(engine.registry()));
        return Ok(());
    }

    let snapshot = match &args.snapshot {
        Some(path) => Snapshot::load(path)
            .with_context(|| format!("failed to load snapshot '{}'", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read snapshot from stdin")?;
            codec::decode(&text, Format::Json).context("failed to decode snapshot from stdin")?
        }
    };
    info!(
        pods = snapshot.graph.pods.len(),
        events = snapshot.events.len(),
        warnings = snapshot.warnings().count(),
        "snapshot loaded"
    );

    let result = engine.evaluate(&snapshot);

    let rendered = render::render(&result, config.output.format)
        .context("failed to render diagnosis")?;
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
