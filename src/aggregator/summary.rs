//! Aggregate counters over the segment table and the trace.

use crate::parser::Document;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Produced vs. used accounting for one segment category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStats {
    /// Segments declared in this category
    pub produced: usize,

    /// Distinct segments of this category that appear in the trace
    pub used: usize,

    /// Sum of declared `length` over the category
    pub produced_cycles: u64,

    /// Sum of realised chunk lengths for chunks in this category
    pub used_cycles: u64,
}

impl CategoryStats {
    /// Declared but never executed. Never negative: every used segment is
    /// also a produced one.
    pub fn unused(&self) -> usize {
        self.produced.saturating_sub(self.used)
    }
}

/// Summary counters printed at the top of the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceSummary {
    pub program_len: usize,

    /// Number of trace chunks, i.e. segment uses including repeats
    pub used_segments: usize,
    pub distinct_used_segments: usize,

    /// Segments used more than once, ascending
    pub duplicated_segments: Vec<usize>,

    pub total_segments: usize,
    pub public_segments: usize,
    pub private_segments: usize,

    pub chunk_count: usize,
    pub total_cycles: usize,

    pub max_used: Option<usize>,

    /// Segment indices below `max_used` that never appear in the trace
    pub missing_segments: Vec<usize>,

    pub public: CategoryStats,
    pub private: CategoryStats,

    /// Public segments that may be entered from the network
    pub from_network: usize,

    /// Public segments that may exit to the network
    pub to_network: usize,
}

/// Compute the summary counters
pub fn summarize(doc: &Document) -> TraceSummary {
    let segments = doc.segments();
    let trace = doc.trace();

    let mut use_counts: BTreeMap<usize, usize> = BTreeMap::new();
    for chunk in trace {
        *use_counts.entry(chunk.segment).or_insert(0) += 1;
    }

    let duplicated_segments = use_counts
        .iter()
        .filter(|(_, &n)| n > 1)
        .map(|(&i, _)| i)
        .collect();

    let max_used = use_counts.keys().next_back().copied();
    let missing_segments = match max_used {
        Some(max) => (0..max).filter(|i| !use_counts.contains_key(i)).collect(),
        None => Vec::new(),
    };

    let mut public = CategoryStats::default();
    let mut private = CategoryStats::default();
    let mut from_network = 0;
    let mut to_network = 0;

    for seg in segments {
        let stats = if seg.is_public() {
            from_network += usize::from(seg.from_network);
            to_network += usize::from(seg.to_network);
            &mut public
        } else {
            &mut private
        };
        stats.produced += 1;
        stats.produced_cycles += seg.length;
    }

    let used: BTreeSet<usize> = use_counts.keys().copied().collect();
    for &i in &used {
        if doc.is_public(i) {
            public.used += 1;
        } else {
            private.used += 1;
        }
    }

    for chunk in trace {
        let cycles = chunk.states.len() as u64;
        if doc.is_public(chunk.segment) {
            public.used_cycles += cycles;
        } else {
            private.used_cycles += cycles;
        }
    }

    let summary = TraceSummary {
        program_len: doc.unit.program.len(),
        used_segments: trace.len(),
        distinct_used_segments: used.len(),
        duplicated_segments,
        total_segments: segments.len(),
        public_segments: public.produced,
        private_segments: private.produced,
        chunk_count: trace.len(),
        total_cycles: doc.total_cycles(),
        max_used,
        missing_segments,
        public,
        private,
        from_network,
        to_network,
    };

    debug!(
        "Summary: {} segments ({} public), {} chunks, {} cycles",
        summary.total_segments, summary.public_segments, summary.chunk_count, summary.total_cycles
    );

    summary
}
