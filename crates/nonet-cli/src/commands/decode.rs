//! Decode command implementation.
//!
//! Decode a frequency table produced elsewhere, e.g. by another backend.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use super::common::{load_counts, print_distribution};
use crate::OutputFormat;

/// Execute the decode command.
pub fn execute(input: &Path, format: OutputFormat) -> Result<()> {
    let counts = load_counts(input)?;
    let dist = nonet_qec::decode(&counts)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&dist)?);
        }
        OutputFormat::Table => {
            println!(
                "{} Decoding {} ({} outcomes, {} shots)",
                style("→").cyan().bold(),
                style(input.display()).green(),
                counts.len(),
                counts.total_shots()
            );
            print_distribution(&dist);
        }
    }

    Ok(())
}
