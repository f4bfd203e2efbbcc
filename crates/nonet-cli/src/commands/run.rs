//! Run command implementation.

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use nonet_adapter_sim::SimulatorBackend;
use nonet_hal::{Backend, BackendConfig, BackendFactory};

use super::common::{build_pipeline, print_circuit_summary, print_counts, print_distribution};
use crate::OutputFormat;
use crate::config::RunConfig;

/// Create the simulator from the run configuration.
fn simulator(config: &RunConfig) -> Result<SimulatorBackend> {
    let mut backend_config = BackendConfig::new("simulator")
        .with_extra("max_qubits", serde_json::json!(config.max_qubits));
    if let Some(seed) = config.seed {
        backend_config = backend_config.with_extra("seed", serde_json::json!(seed));
    }
    Ok(SimulatorBackend::from_config(backend_config)?)
}

/// Execute the run command.
pub fn execute(config: &RunConfig, format: OutputFormat) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let backend = simulator(config)?;

    if format == OutputFormat::Json {
        let outcome = pipeline.run(&backend, config.shots)?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "{} Running Shor code with payload {} on {} ({} shots)",
        style("→").cyan().bold(),
        style(pipeline.payload_name()).green(),
        style(backend.name()).yellow(),
        config.shots
    );
    if let Some(seed) = config.seed {
        println!("  Seed: {seed}");
    }

    let (circuit, _) = pipeline.build()?;
    print_circuit_summary(&circuit);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Simulating...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = pipeline.execute(&circuit, &backend, config.shots);
    spinner.finish_and_clear();
    let outcome = outcome?;

    print_counts(&outcome.counts, outcome.execution_time_ms);
    print_distribution(&outcome.distribution);

    Ok(())
}
