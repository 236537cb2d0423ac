//! Report command implementation.
//!
//! The report command:
//! 1. Loads the trace document
//! 2. Prints summary counters
//! 3. Runs the memory folding detections
//! 4. Ranks secret execution cost (when public segments exist)
//! 5. Optionally prints segments, chunks and the pc range summary

use super::models::ReportArgs;
use crate::aggregator::{
    folding_stats, function_args, public_pc_stats, single_chunk_states, summarize,
    summarize_pc_ranges,
};
use crate::output::{
    write_chunks, write_folding, write_header, write_pc_costs, write_pc_summary, write_segments,
    write_summary, PcRunLine,
};
use crate::parser::{load_document, Document, LabelResolver};
use crate::utils::config::TOP_N;
use crate::utils::error::AnalysisError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Write;
use std::time::Instant;

/// Execute the report command, writing the report to `out`
///
/// # Errors
/// * Document cannot be read or decoded
/// * Trace references a segment that does not exist
/// * `--fun-args` on a trace with more than one chunk
pub fn execute_report<W: Write>(args: &ReportArgs, out: &mut W) -> Result<()> {
    let start_time = Instant::now();

    let doc = load_document(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    doc.check_references()
        .context("Trace document references unknown segments")?;

    let labels = LabelResolver::from_document(&doc);
    if labels.is_empty() {
        debug!("No labels available, names fall back to raw pcs");
    }

    write_header(out, &doc)?;

    let summary = summarize(&doc);
    write_summary(out, &summary)?;

    write_folding(out, &folding_stats(&doc))?;

    if let Some(costs) = public_pc_stats(&doc, &labels, TOP_N) {
        write_pc_costs(out, &costs)?;
    }

    if let Some(end) = args.segments_to {
        write_segments(out, doc.segments(), args.segments_from, end)?;
    }

    if args.print_chunks {
        write_chunks(out, &doc, args.chunk_bound)?;
    }

    if args.pc_summary {
        let lines = pc_summary_lines(&doc, &labels, args.cutoff, args.fun_args)?;
        write_pc_summary(out, &lines)?;
    }

    info!("Report completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Resolve names and, when requested, function arguments for each pc run
///
/// Arguments are only recovered at runs starting on a label that does not
/// begin with `.` or `_`.
pub fn pc_summary_lines(
    doc: &Document,
    labels: &LabelResolver,
    cutoff: Option<usize>,
    fun_args: bool,
) -> Result<Vec<PcRunLine>, AnalysisError> {
    let states = if fun_args {
        Some(single_chunk_states(doc)?)
    } else {
        None
    };

    summarize_pc_ranges(doc, cutoff)
        .into_iter()
        .map(|run| {
            let name = labels.exact(run.start_pc).map(str::to_string);
            let args = match (states, name.as_deref()) {
                (Some(states), Some(name)) if !name.starts_with(['.', '_']) => {
                    Some(function_args(states, run.start_step)?)
                }
                _ => None,
            };
            Ok::<_, AnalysisError>(PcRunLine { run, name, args })
        })
        .collect()
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<(), AnalysisError> {
    if args.input.as_os_str().is_empty() {
        return Err(AnalysisError::InvalidArgs("input path cannot be empty".to_string()));
    }

    if let Some(end) = args.segments_to {
        if args.segments_from > end {
            return Err(AnalysisError::InvalidArgs(format!(
                "segment range start {} is past its end {}",
                args.segments_from, end
            )));
        }
    }

    if args.chunk_bound.is_some() && !args.print_chunks {
        return Err(AnalysisError::InvalidArgs(
            "--chunk-bound requires --chunks".to_string(),
        ));
    }

    if (args.cutoff.is_some() || args.fun_args) && !args.pc_summary {
        return Err(AnalysisError::InvalidArgs(
            "--cutoff and --fun-args require --pc-summary".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_default() {
        assert!(validate_args(&ReportArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_input() {
        let args = ReportArgs {
            input: Default::default(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_inverted_segment_range() {
        let args = ReportArgs {
            segments_from: 10,
            segments_to: Some(4),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_fun_args_without_summary() {
        let args = ReportArgs {
            fun_args: true,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());

        let args = ReportArgs {
            fun_args: true,
            pc_summary: true,
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_chunk_bound_without_chunks() {
        let args = ReportArgs {
            chunk_bound: Some(100),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }
}
