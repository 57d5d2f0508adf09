//! Paging simulator CLI.
//!
//! Replays a process list and a memory-access trace through the simulator and reports the
//! number of page swaps. It performs:
//! 1. **Argument validation:** Five positional arguments; any error exits with code 1.
//! 2. **Simulation:** Loads both files and runs them under the chosen algorithm and mode.
//! 3. **Reporting:** Optional statistics table or JSON, then the swap count as the last line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use vmsim_core::config::{Algorithm, Config, SwapMode};
use vmsim_core::{SimError, sim};

#[derive(Parser, Debug)]
#[command(
    name = "vmsim",
    author,
    version,
    about = "Trace-driven virtual-memory paging simulator",
    long_about = "Replay a memory-access trace against per-process page tables and count page swaps.\n\nExamples:\n  vmsim plist ptrace 2 FIFO -\n  vmsim plist ptrace 8 Clock + --stats\n  RUST_LOG=debug vmsim plist ptrace 4 LRU -"
)]
struct Cli {
    /// Process list: one `<label> <total_memory_bytes>` line per process.
    plist: PathBuf,

    /// Trace: one `<process_index> <byte_address>` line per access.
    ptrace: PathBuf,

    /// Page size in bytes (power of 2, 2..=32).
    page_size: u64,

    /// Page replacement algorithm: FIFO, LRU or Clock.
    algorithm: String,

    /// Paging mode: `+` for pre-paging, `-` for demand paging.
    #[arg(allow_hyphen_values = true)]
    mode: String,

    /// Physical memory shared by all processes, in bytes.
    #[arg(long, default_value_t = vmsim_core::common::MEMORY_SIZE)]
    memory_size: u64,

    /// Print the statistics table before the swap count.
    #[arg(long)]
    stats: bool,

    /// Print the full result as JSON before the swap count.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(kind = e.kind(), "simulation aborted");
            eprint!("{}", error_report(&e));
            ExitCode::FAILURE
        }
    }
}

/// Text written to stderr when a run fails.
fn error_report(err: &SimError) -> String {
    format!("Error: {err}\nError, exiting simulation...\n")
}

/// Builds the configuration from the positional arguments.
fn config_from(cli: &Cli) -> Result<Config, SimError> {
    let algorithm: Algorithm = cli.algorithm.parse()?;
    let swap_mode: SwapMode = cli.mode.parse()?;
    let config = Config::new(cli.page_size, algorithm, swap_mode).with_memory_size(cli.memory_size);
    config.validate()?;
    Ok(config)
}

/// Runs the simulation and prints the report.
fn run(cli: &Cli) -> Result<(), SimError> {
    let config = config_from(cli)?;
    tracing::info!(
        plist = %cli.plist.display(),
        ptrace = %cli.ptrace.display(),
        page_size = config.page_size,
        algorithm = %config.algorithm,
        mode = %config.swap_mode,
        flag = config.swap_mode.flag(),
        "starting simulation"
    );

    let result = sim::run_files(&config, &cli.plist, &cli.ptrace)?;

    if cli.stats {
        result.stats.print();
    }
    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!("could not serialize result: {e}"),
        }
    }
    println!("Total page swaps: {}", result.swaps);
    Ok(())
}
