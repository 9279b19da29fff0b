// Main entry point - Dependency wiring and the four-step demo run
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::clock::Clock;
use crate::application::pipeline::{DemoPipeline, select_model};
use crate::infrastructure::config::load_pipeline_config;
use crate::infrastructure::system_clock::SystemClock;
use crate::presentation::cli::Cli;
use crate::presentation::console;

fn setup_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_pipeline_config(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config))?
        .with_seed_override(cli.seed);

    let model = select_model(cli.model.as_deref())
        .context("Failed to load model configuration")?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let pipeline = DemoPipeline::new(config, clock, &cli.output);

    console::print_header();

    let dataset = pipeline
        .generate(cli.samples)
        .context("Failed to generate dataset")?;
    console::print_dataset(&dataset);

    let sensor = pipeline
        .build_sensor(model)
        .context("Failed to initialize soft sensor")?;
    console::print_sensor(&sensor);

    let report = pipeline
        .infer(&sensor, &dataset)
        .context("Failed to run inference")?;
    console::print_inference(&report, pipeline.paths());

    let outcome = pipeline
        .audit(&sensor, &dataset, &report)
        .context("Failed to write audit log")?;
    console::print_audit(&outcome);

    console::print_footer(pipeline.paths(), &outcome);

    if cli.verbose {
        console::print_sample_predictions(&report.predictions);
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
