//! Contiguous pc range summarization with loop folding.
//!
//! `0,1,2,5,6,7` becomes `0-2, 5-7`. Jumping back to the start of the run
//! that is currently open counts as a loop iteration instead of opening a
//! new run.

use crate::parser::{Document, State};
use crate::utils::config::ARG_REGISTERS;
use crate::utils::error::AnalysisError;
use log::debug;

/// One contiguous pc run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcRun {
    /// 1-based trace step at which the run began
    pub start_step: usize,

    pub start_pc: u64,

    /// Last pc of the run; `None` for the run still open at the end
    pub end_pc: Option<u64>,

    /// Times execution jumped back to `start_pc`
    pub loop_count: u64,
}

impl PcRun {
    fn open(start_step: usize, start_pc: u64) -> Self {
        Self {
            start_step,
            start_pc,
            end_pc: None,
            loop_count: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_pc.is_none()
    }
}

/// Summarize the flattened trace into pc runs, in order
///
/// `cutoff` is a soft bound: once the step count passes it, the walk
/// leaves the current chunk, but each following chunk still contributes
/// its first state before the check fires again.
pub fn summarize_pc_ranges(doc: &Document, cutoff: Option<usize>) -> Vec<PcRun> {
    let mut runs = Vec::new();
    let mut current: Option<PcRun> = None;
    let mut last_pc: u64 = 0;
    let mut step: usize = 0;

    for chunk in doc.trace() {
        for state in &chunk.states {
            step += 1;
            let new_pc = state.pc;

            if let Some(run) = current.as_mut() {
                if new_pc != last_pc.wrapping_add(1) {
                    if new_pc == run.start_pc {
                        run.loop_count += 1;
                    } else {
                        let mut closed = std::mem::replace(run, PcRun::open(step, new_pc));
                        closed.end_pc = Some(last_pc);
                        runs.push(closed);
                    }
                }
            } else {
                current = Some(PcRun::open(step, new_pc));
            }

            last_pc = new_pc;
            if cutoff.is_some_and(|bound| step > bound) {
                break;
            }
        }
    }

    runs.extend(current);
    debug!("Summarized {} steps into {} pc runs", step, runs.len());
    runs
}

/// States of a single-chunk trace
///
/// Step numbers only map onto a state list when the trace is one chunk
/// (no public segments interleaved), so anything else is refused.
pub fn single_chunk_states(doc: &Document) -> Result<&[State], AnalysisError> {
    match doc.trace() {
        [only] => Ok(&only.states),
        chunks => Err(AnalysisError::MultipleChunks(chunks.len())),
    }
}

/// Function argument registers at the state where a run began
pub fn function_args(states: &[State], start_step: usize) -> Result<Vec<u64>, AnalysisError> {
    let state = start_step
        .checked_sub(1)
        .and_then(|i| states.get(i))
        .ok_or(AnalysisError::StepOutOfRange {
            step: start_step,
            len: states.len(),
        })?;

    Ok(state
        .regs
        .iter()
        .skip(ARG_REGISTERS.start)
        .take(ARG_REGISTERS.len())
        .copied()
        .collect())
}
