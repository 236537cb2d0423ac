//! Human-readable report sections printed by `trace-report`.
//!
//! Every writer takes any `io::Write` so the report can go to stdout or
//! be captured in tests.

use crate::aggregator::{CategoryStats, FoldingStats, PcCostStats, PcRun, TraceSummary};
use crate::parser::{Document, Segment};
use ciborium::Value;
use std::io::{self, Write};

/// Version and feature header
pub fn write_header<W: Write>(out: &mut W, doc: &Document) -> io::Result<()> {
    writeln!(
        out,
        "version: {:?}. Features: {}",
        doc.version,
        render_value(&doc.features)
    )
}

/// Segment and cycle accounting
pub fn write_summary<W: Write>(out: &mut W, s: &TraceSummary) -> io::Result<()> {
    writeln!(out, "Program length {}", s.program_len)?;
    writeln!(
        out,
        "{} used segments. {} distinct used segments",
        s.used_segments, s.distinct_used_segments
    )?;
    writeln!(out, "Duplicated segments: {:?}", s.duplicated_segments)?;
    writeln!(
        out,
        "{} segments. {} of them public {} of them private",
        s.total_segments, s.public_segments, s.private_segments
    )?;
    writeln!(out, "{} chunks in trace", s.chunk_count)?;

    writeln!(out, "## Public segments")?;
    write_category(out, &s.public)?;
    writeln!(out, "## Private segments")?;
    write_category(out, &s.private)?;

    match s.max_used {
        Some(max) => writeln!(out, "Max Used: {}", max)?,
        None => writeln!(out, "Max Used: none")?,
    }
    writeln!(out, "Missing segments: {:?}", s.missing_segments)?;
    writeln!(out, "Trace length: {}", s.total_cycles)?;
    writeln!(out, "FromNetwork: {}", s.from_network)?;
    writeln!(out, "ToNetwork: {}", s.to_network)
}

fn write_category<W: Write>(out: &mut W, c: &CategoryStats) -> io::Result<()> {
    writeln!(out, "Produced: \t{}", c.produced)?;
    writeln!(out, "Used: \t\t{}", c.used)?;
    writeln!(out, "Unused: \t{}", c.unused())?;
    writeln!(out, "Produced cycles: \t{}", c.produced_cycles)?;
    writeln!(out, "Used cycles: \t{}", c.used_cycles)
}

/// First join / secret / network positions
pub fn write_folding<W: Write>(out: &mut W, f: &FoldingStats) -> io::Result<()> {
    writeln!(out, "## Memory folding")?;
    if let Some(cycle) = f.first_join {
        writeln!(out, "First join: \t\tcycle {}", cycle)?;
    }
    if let Some(cycle) = f.first_secret {
        writeln!(out, "First secret segment: \tcycle {}", cycle)?;
    }
    if let Some(cycle) = f.first_network {
        writeln!(out, "First use of network: \tcycle {}", cycle)?;
    }
    Ok(())
}

/// Secret cost rankings
pub fn write_pc_costs<W: Write>(out: &mut W, p: &PcCostStats) -> io::Result<()> {
    writeln!(out, "## Public PC")?;
    writeln!(out, "Most expensive secret blocks:")?;
    for (label, cost) in &p.top_labels {
        writeln!(out, "  {}: {} cycles", label, cost)?;
    }
    writeln!(out, "Most expensive secret instructions:")?;
    for (pc, cost) in &p.top_pcs {
        writeln!(out, "  {}: {} cycles", pc, cost)?;
    }
    writeln!(out, "Most expensive unused public blocks:")?;
    for (name, cost) in &p.top_unused_public {
        writeln!(out, "  {}: {} cycles", name, cost)?;
    }
    Ok(())
}

/// Segments `[start, end)`, one per line
pub fn write_segments<W: Write>(
    out: &mut W,
    segments: &[Segment],
    start: usize,
    end: usize,
) -> io::Result<()> {
    for (i, seg) in segments.iter().enumerate().take(end).skip(start) {
        let pc = seg.public_pc().map_or_else(|| "-".to_string(), |pc| pc.to_string());
        writeln!(
            out,
            "{} pc={} len={} succ={:?} from_net={} to_net={}",
            i, pc, seg.length, seg.successors, seg.from_network, seg.to_network
        )?;
    }
    Ok(())
}

/// Chunk-by-chunk trace overview
///
/// Stops after the chunk in which the running cycle count passes `bound`.
/// A bound of 0 means no bound.
pub fn write_chunks<W: Write>(out: &mut W, doc: &Document, bound: Option<usize>) -> io::Result<()> {
    let mut cycle = 0usize;
    for chunk in doc.trace() {
        let states = &chunk.states;
        writeln!(out, "Segment Index: {}", chunk.segment)?;
        writeln!(out, "States:")?;

        if let Some(first) = states.first() {
            writeln!(out, "\t{}. Pc: {}", cycle, first.pc)?;
        }
        if states.len() > 3 {
            writeln!(out, "\t\t...")?;
        }
        if states.len() >= 3 {
            let k = states.len() - 2;
            writeln!(out, "\t{}. Pc: {}", cycle + k, states[k].pc)?;
        }
        if states.len() >= 2 {
            let k = states.len() - 1;
            writeln!(out, "\t{}. Pc: {}", cycle + k, states[k].pc)?;
        }

        cycle += states.len();
        if bound.filter(|&b| b > 0).is_some_and(|b| cycle > b) {
            break;
        }
    }
    Ok(())
}

/// A pc run ready for printing
#[derive(Debug, Clone)]
pub struct PcRunLine {
    pub run: PcRun,

    /// Label bound exactly at the run's start pc
    pub name: Option<String>,

    /// Recovered function arguments, when requested
    pub args: Option<Vec<u64>>,
}

/// PC range summary, one run per line
pub fn write_pc_summary<W: Write>(out: &mut W, lines: &[PcRunLine]) -> io::Result<()> {
    writeln!(out, "## PC summary")?;
    for line in lines {
        let run = &line.run;
        let end = run.end_pc.map_or_else(String::new, |pc| pc.to_string());
        match &line.name {
            Some(name) => writeln!(out, "{} : {}-{} ({})", run.start_step, run.start_pc, end, name)?,
            None => writeln!(out, "{} : {}-{}", run.start_step, run.start_pc, end)?,
        }
        if let Some(args) = &line.args {
            let hex: Vec<String> = args.iter().map(|a| format!("{:#x}", a)).collect();
            writeln!(out, "\tARGUMENTS: [{}]", hex.join(", "))?;
        }
        if run.loop_count > 0 {
            writeln!(out, "\tLooped {} times.", run.loop_count)?;
        }
    }
    Ok(())
}

/// Compact text rendering of an opaque CBOR value
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Integer(i) => i128::from(*i).to_string(),
        Value::Text(s) => format!("{:?}", s),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Float(f) => f.to_string(),
        Value::Bytes(b) => format!("<{} bytes>", b.len()),
        Value::Tag(tag, inner) => format!("{}({})", tag, render_value(inner)),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Map(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{}: {}", render_value(k), render_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        _ => format!("{:?}", value),
    }
}
