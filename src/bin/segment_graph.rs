//! Segment Graph CLI
//!
//! Writes the segment graph of a trace document as Graphviz input.
//!
//! Usage: `segment-graph out.cbor | dot -Tpdf -o segments.pdf`

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::io::{self, Write};
use std::path::PathBuf;

use segment_trace_studio::commands::{execute_graph, GraphArgs};

/// Segment Graph - Graphviz view of declared vs. executed segment edges
#[derive(Parser, Debug)]
#[command(name = "segment-graph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Trace document (CBOR)
    input: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_graph(&GraphArgs { input: cli.input }, &mut out)?;
    out.flush()?;

    Ok(())
}
