pub mod cli;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod stage;
pub mod toolchain;

use anyhow::Context;
use clap::Parser;
use log::debug;

use crate::cli::DriverConfig;
use crate::model::SourceFile;
use crate::pipeline::Outcome;
use crate::toolchain::{SystemToolchain, Toolchain};

/// Parses the command line, runs the pipeline and returns the exit code.
pub fn run() -> anyhow::Result<i32> {
    let config = cli::Cli::parse().into_config();
    init_logging(config.verbose);

    let mut tools = SystemToolchain::new(config.tools.clone());
    let outcome = drive(&config, &mut tools)?;
    Ok(outcome.status.code())
}

/// Validates the input, then hands it to the pipeline executor.
///
/// No tool is invoked unless the input passes validation.
pub fn drive<T: Toolchain>(config: &DriverConfig, tools: &mut T) -> anyhow::Result<Outcome> {
    // 1. ── Validate ──────────────────────────────────────────────────
    let source = SourceFile::open(&config.input)?;
    debug!(
        "input {} accepted, cutoff {} ({})",
        source.path().display(),
        config.cutoff,
        config.cutoff.cutoff()
    );

    // 2. ── Execute ───────────────────────────────────────────────────
    let outcome = pipeline::execute(tools, &source, config.cutoff, config.keep_assembly)
        .with_context(|| format!("Compiling {}", source.path().display()))?;
    debug!("finished in state {:?}", outcome.state);

    Ok(outcome)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
