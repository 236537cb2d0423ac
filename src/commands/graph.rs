//! Graph command implementation.
//!
//! Loads the document and writes the segment graph for an external
//! layout tool.

use super::models::GraphArgs;
use crate::output::render_segment_graph;
use crate::parser::load_document;
use anyhow::{Context, Result};
use log::info;
use std::io::Write;

/// Execute the graph command, writing the `digraph` to `out`
pub fn execute_graph<W: Write>(args: &GraphArgs, out: &mut W) -> Result<()> {
    let doc = load_document(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    doc.check_references()
        .context("Trace document references unknown segments")?;

    let dot = render_segment_graph(&doc);
    out.write_all(dot.as_bytes())
        .context("Failed to write graph")?;

    info!("✓ Segment graph written ({} segments)", doc.segments().len());
    Ok(())
}
