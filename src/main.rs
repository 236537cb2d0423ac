//! Trace Report CLI
//!
//! Prints segment accounting, memory folding positions, secret cost
//! rankings and an optional pc range summary for a trace document.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::io::{self, Write};
use std::path::PathBuf;

use segment_trace_studio::commands::{execute_report, validate_args, ReportArgs};
use segment_trace_studio::utils::config::DEFAULT_TRACE_PATH;

/// Trace Report - statistics over a segmented execution trace
#[derive(Parser, Debug)]
#[command(name = "trace-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Trace document (CBOR)
    #[arg(default_value = DEFAULT_TRACE_PATH)]
    input: PathBuf,

    /// Print segments up to (excluding) this index
    #[arg(long, value_name = "END")]
    segments: Option<usize>,

    /// First segment index printed by --segments
    #[arg(long, value_name = "START", default_value = "0")]
    segments_from: usize,

    /// Print a chunk-by-chunk trace overview
    #[arg(long)]
    chunks: bool,

    /// Stop the chunk overview once this many cycles are printed
    #[arg(long, value_name = "CYCLES")]
    chunk_bound: Option<usize>,

    /// Print contiguous pc ranges with loop folding
    #[arg(long)]
    pc_summary: bool,

    /// Soft step bound for --pc-summary
    #[arg(long, value_name = "STEP")]
    cutoff: Option<usize>,

    /// Recover function arguments at labelled runs (single-chunk traces only)
    #[arg(long)]
    fun_args: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = ReportArgs {
        input: cli.input,
        segments_to: cli.segments,
        segments_from: cli.segments_from,
        print_chunks: cli.chunks,
        chunk_bound: cli.chunk_bound,
        pc_summary: cli.pc_summary,
        cutoff: cli.cutoff,
        fun_args: cli.fun_args,
    };

    // Validate args first
    validate_args(&args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_report(&args, &mut out)?;
    out.flush()?;

    Ok(())
}
