//! Circuit export command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use super::common::{build_pipeline, print_circuit_summary};
use crate::config::RunConfig;

/// Execute the circuit command.
pub fn execute(config: &RunConfig, output: Option<&Path>) -> Result<()> {
    let (circuit, _) = build_pipeline(config)?.build()?;
    let json = circuit.to_json()?;

    match output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            println!(
                "{} Wrote circuit to {}",
                style("✓").green().bold(),
                style(path.display()).green()
            );
            print_circuit_summary(&circuit);
        }
        None => println!("{json}"),
    }

    Ok(())
}
