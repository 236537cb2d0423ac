//! Cycle cost attribution for secret (private) execution.
//!
//! Public chunks are skipped apart from remembering their final state.
//! Inside private chunks every cycle is charged to the previous state's pc
//! and to the most recent label seen at a previous state's pc.

use crate::parser::{Document, LabelResolver, State};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Insertion-ordered cycle totals
///
/// Rankings sort stably, so ties keep first-seen order.
#[derive(Debug, Clone)]
pub struct CycleTally<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
}

impl<K> Default for CycleTally<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> CycleTally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K, cycles: u64) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += cycles,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, cycles));
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<u64> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    /// The `n` most expensive entries, descending
    pub fn top(&self, n: usize) -> Vec<(K, u64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rankings produced by [`public_pc_stats`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PcCostStats {
    /// Most expensive secret blocks by label
    pub top_labels: Vec<(String, u64)>,

    /// Most expensive secret instructions by pc
    pub top_pcs: Vec<(u64, u64)>,

    /// Most expensive public blocks never executed, by declared length
    pub top_unused_public: Vec<(String, u64)>,
}

/// Rank secret execution cost and unused public blocks
///
/// Returns `None` when the document has no public segments.
pub fn public_pc_stats(doc: &Document, labels: &LabelResolver, top_n: usize) -> Option<PcCostStats> {
    if !doc.segments().iter().any(|s| s.is_public()) {
        debug!("No public segments, skipping public pc stats");
        return None;
    }

    let mut label_cyc: CycleTally<String> = CycleTally::new();
    let mut pc_cyc: CycleTally<u64> = CycleTally::new();
    let mut last_label: Option<&str> = None;
    let mut prev_state: Option<&State> = None;

    for chunk in doc.trace() {
        if doc.is_public(chunk.segment) {
            if let Some(last) = chunk.states.last() {
                prev_state = Some(last);
            }
            continue;
        }

        for state in &chunk.states {
            // No context before the very first state of the trace
            if let Some(prev) = prev_state {
                if let Some(label) = labels.exact(prev.pc) {
                    last_label = Some(label);
                }
                if let Some(label) = last_label {
                    label_cyc.add(label.to_string(), 1);
                }
                pc_cyc.add(prev.pc, 1);
            }
            prev_state = Some(state);
        }
    }

    let used: HashSet<usize> = doc.trace().iter().map(|c| c.segment).collect();

    let mut unused_pub: CycleTally<u64> = CycleTally::new();
    for (i, seg) in doc.segments().iter().enumerate() {
        if used.contains(&i) {
            continue;
        }
        if let Some(pc) = seg.public_pc() {
            unused_pub.add(pc, seg.length);
        }
    }

    let top_unused_public = unused_pub
        .top(top_n)
        .into_iter()
        .map(|(pc, cost)| {
            let name = labels.exact(pc).map_or_else(|| pc.to_string(), str::to_string);
            (name, cost)
        })
        .collect();

    Some(PcCostStats {
        top_labels: label_cyc.top(top_n),
        top_pcs: pc_cyc.top(top_n),
        top_unused_public,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_accumulates() {
        let mut tally = CycleTally::new();
        tally.add("a", 2);
        tally.add("b", 1);
        tally.add("a", 3);

        assert_eq!(tally.len(), 2);
        assert_eq!(tally.get(&"a"), Some(5));
        assert_eq!(tally.get(&"c"), None);
    }

    #[test]
    fn test_tally_top_keeps_insertion_order_on_ties() {
        let mut tally = CycleTally::new();
        tally.add(30, 4);
        tally.add(10, 7);
        tally.add(20, 4);
        tally.add(40, 1);

        assert_eq!(tally.top(3), vec![(10, 7), (30, 4), (20, 4)]);
    }

    #[test]
    fn test_tally_top_empty() {
        let tally: CycleTally<u64> = CycleTally::new();
        assert!(tally.is_empty());
        assert!(tally.top(5).is_empty());
    }
}
