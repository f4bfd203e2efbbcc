//! Nonet Command-Line Interface
//!
//! Builds the nine-qubit Shor code circuit, runs it on the local simulator
//! and decodes the outcome statistics.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{circuit, decode, run, version};
use config::RunConfig;

/// Nonet - nine-qubit Shor code encode, correct and decode pipeline
#[derive(Parser)]
#[command(name = "nonet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON on stdout
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the Shor code circuit, simulate it and decode the result
    Run {
        /// Number of shots [default: 1024]
        #[arg(short, long)]
        shots: Option<u32>,

        /// Simulator RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Payload applied to the encoded register (hadamard, identity)
        #[arg(short, long)]
        payload: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Decode a frequency table stored as JSON
    Decode {
        /// JSON file mapping bitstrings to counts
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Export the built circuit as JSON
    Circuit {
        /// Payload applied to the encoded register (hadamard, identity)
        #[arg(short, long)]
        payload: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

impl Commands {
    /// Subcommand name as typed on the command line.
    fn name(&self) -> &'static str {
        match self {
            Self::Run { .. } => "run",
            Self::Decode { .. } => "decode",
            Self::Circuit { .. } => "circuit",
            Self::Version => "version",
        }
    }
}

/// Resolve configuration: file and environment first, then explicit flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<RunConfig> {
    let mut config = RunConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Run {
            shots,
            seed,
            payload,
            ..
        } => {
            if let Some(shots) = shots {
                config.shots = *shots;
            }
            if let Some(seed) = seed {
                config.seed = Some(*seed);
            }
            if let Some(payload) = payload {
                config.payload.clone_from(payload);
            }
        }
        Commands::Circuit {
            payload: Some(payload),
            ..
        } => config.payload.clone_from(payload),
        _ => {}
    }

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = resolve_config(&cli).and_then(|config| {
        // Setup logging
        let filter = match cli.verbose {
            0 => config.log_level.as_str(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();

        debug!("Dispatching '{}' with {:?}", cli.command.name(), config);

        // Execute command
        match cli.command {
            Commands::Run { format, .. } => run::execute(&config, format),
            Commands::Decode { input, format } => decode::execute(&input, format),
            Commands::Circuit { output, .. } => circuit::execute(&config, output.as_deref()),
            Commands::Version => {
                version::execute();
                Ok(())
            }
        }
    });

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
