//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use nonet_hal::Counts;
use nonet_ir::Circuit;
use nonet_qec::{LogicalDistribution, QecPipeline, payload_by_name};

use crate::config::RunConfig;

/// Number of outcomes shown in the frequency table.
const MAX_ROWS: usize = 16;

/// Build the reference pipeline with the configured payload.
pub fn build_pipeline(config: &RunConfig) -> Result<QecPipeline> {
    let payload = payload_by_name(&config.payload)
        .ok_or_else(|| anyhow::anyhow!("Unknown payload: '{}'", config.payload))?;
    Ok(QecPipeline::shor().with_boxed_payload(payload))
}

/// Load a frequency table from a JSON file.
pub fn load_counts(path: &Path) -> Result<Counts> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    serde_json::from_str(&source)
        .with_context(|| format!("Invalid frequency table in {}", path.display()))
}

/// Print qubit, clbit, depth and gate counts of a circuit.
pub fn print_circuit_summary(circuit: &Circuit) {
    println!(
        "  Circuit: {} qubits, {} clbits, depth {}, {} ops",
        circuit.num_qubits(),
        circuit.num_clbits(),
        circuit.depth(),
        circuit.num_ops()
    );

    let ops: Vec<String> = circuit
        .count_ops()
        .into_iter()
        .map(|(name, n)| format!("{name}: {n}"))
        .collect();
    println!("  Gates:   {}", style(ops.join(", ")).dim());
}

/// Print a frequency table, most frequent outcome first.
pub fn print_counts(counts: &Counts, execution_time_ms: Option<u64>) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        counts.total_shots()
    );

    let sorted = counts.sorted();
    let total = counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(MAX_ROWS) {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > MAX_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_ROWS);
    }

    if let Some(time_ms) = execution_time_ms {
        println!("\n  Execution time: {} ms", style(time_ms).yellow());
    }
}

/// Print decoded logical probabilities and their sum.
pub fn print_distribution(dist: &LogicalDistribution) {
    println!("\n{} Logical state (majority vote):", style("✓").green().bold());
    println!(
        "  P(|0>) = {} ({}/{})",
        style(format!("{:.6}", dist.p_zero)).cyan(),
        dist.zero_count,
        dist.total
    );
    println!(
        "  P(|1>) = {} ({}/{})",
        style(format!("{:.6}", dist.p_one)).cyan(),
        dist.one_count,
        dist.total
    );
    println!("  Sum of probabilities: {:.6}", dist.sum());
}
