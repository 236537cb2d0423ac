//! First-occurrence detections used to reason about memory folding.
//!
//! One forward pass over the trace. Position is measured in cumulative
//! declared segment length before the chunk is processed. Each detection
//! fires at most once.

use super::adjacency::segment_predecessors;
use crate::parser::Document;
use log::debug;

/// Cycle positions of the first join, secret segment and network use
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldingStats {
    /// First segment with more than one declared predecessor
    pub first_join: Option<u64>,

    /// First segment without a public entry pc
    pub first_secret: Option<u64>,

    /// First transition that is not a declared edge (position 0 excluded)
    pub first_network: Option<u64>,
}

pub fn folding_stats(doc: &Document) -> FoldingStats {
    let preds = segment_predecessors(doc.segments());
    let mut stats = FoldingStats::default();

    let mut cycle: u64 = 0;
    let mut prev: Option<usize> = None;

    for (pos, chunk) in doc.trace().iter().enumerate() {
        let i = chunk.segment;
        let seg_preds = preds.get(i);

        if stats.first_join.is_none() && seg_preds.is_some_and(|p| p.len() > 1) {
            debug!("First join at chunk {} (segment {})", pos, i);
            stats.first_join = Some(cycle);
        }

        if stats.first_secret.is_none() && !doc.is_public(i) {
            debug!("First secret segment at chunk {} (segment {})", pos, i);
            stats.first_secret = Some(cycle);
        }

        if stats.first_network.is_none() && pos != 0 {
            let declared = match (prev, seg_preds) {
                (Some(p), Some(set)) => set.contains(&p),
                _ => false,
            };
            if !declared {
                debug!("First network use at chunk {} (segment {})", pos, i);
                stats.first_network = Some(cycle);
            }
        }

        cycle += doc.segment_len(i);
        prev = Some(i);
    }

    stats
}
