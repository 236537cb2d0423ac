//! Relations derived from the segment table and the trace.
//!
//! Nothing here is stored in the document: predecessors are the reverse of
//! the declared successor sets, and prev/next come from consecutive chunks.

use crate::parser::{Document, Segment};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Statically declared predecessors of every segment
pub fn segment_predecessors(segments: &[Segment]) -> Vec<BTreeSet<usize>> {
    let mut preds = vec![BTreeSet::new(); segments.len()];
    for (i, seg) in segments.iter().enumerate() {
        for &j in &seg.successors {
            if let Some(set) = preds.get_mut(j) {
                set.insert(i);
            }
        }
    }
    preds
}

/// Segment transitions realised by the trace
///
/// When a segment appears more than once, the last transition wins.
#[derive(Debug, Clone, Default)]
pub struct TraceAdjacency {
    pub prev_seg: HashMap<usize, usize>,
    pub next_seg: HashMap<usize, usize>,
    pub seen: HashSet<usize>,
}

impl TraceAdjacency {
    pub fn from_document(doc: &Document) -> Self {
        let trace = doc.trace();
        let mut adjacency = Self {
            seen: trace.iter().map(|c| c.segment).collect(),
            ..Self::default()
        };

        for pair in trace.windows(2) {
            let (from, to) = (pair[0].segment, pair[1].segment);
            adjacency.next_seg.insert(from, to);
            adjacency.prev_seg.insert(to, from);
        }

        adjacency
    }

    /// Entered from somewhere other than a declared predecessor
    pub fn used_from_network(&self, doc: &Document, i: usize) -> bool {
        match self.prev_seg.get(&i) {
            Some(&prev) => !doc
                .segment(prev)
                .is_some_and(|s| s.successors.contains(&i)),
            None => false,
        }
    }

    /// Left towards something other than a declared successor
    pub fn used_to_network(&self, doc: &Document, i: usize) -> bool {
        match self.next_seg.get(&i) {
            Some(next) => !doc
                .segment(i)
                .is_some_and(|s| s.successors.contains(next)),
            None => false,
        }
    }
}
