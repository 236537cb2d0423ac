//! Program counter to label name resolution.
//!
//! Labels are injective (name -> pc), so the reverse map is keyed by pc and
//! the nearest lower label is a floor query on the ordered map.

use super::schema::Document;
use std::collections::{BTreeMap, HashMap};

/// Reverse label map with a memoised `pc_name`
#[derive(Debug, Clone, Default)]
pub struct LabelResolver {
    by_pc: BTreeMap<u64, String>,
    cache: HashMap<u64, String>,
}

impl LabelResolver {
    /// Build from a name -> pc map. If two names share a pc, the
    /// lexicographically last one wins.
    pub fn new(labels: &BTreeMap<String, u64>) -> Self {
        let by_pc = labels
            .iter()
            .map(|(name, pc)| (*pc, name.clone()))
            .collect();
        Self {
            by_pc,
            cache: HashMap::new(),
        }
    }

    pub fn from_document(doc: &Document) -> Self {
        doc.labels().map(Self::new).unwrap_or_default()
    }

    /// Label bound exactly at `pc`, unescaped
    pub fn exact(&self, pc: u64) -> Option<&str> {
        self.by_pc.get(&pc).map(String::as_str)
    }

    /// Nearest label strictly below `pc`
    pub fn floor_below(&self, pc: u64) -> Option<(u64, &str)> {
        self.by_pc
            .range(..pc)
            .next_back()
            .map(|(label_pc, name)| (*label_pc, name.as_str()))
    }

    /// Display name for `pc`, escaped for a quoted graph attribute
    ///
    /// Exact label, else `<label> +<offset>` from the nearest lower label,
    /// else the raw pc. Results are cached for the resolver's lifetime.
    pub fn pc_name(&mut self, pc: u64) -> String {
        if let Some(name) = self.cache.get(&pc) {
            return name.clone();
        }

        let name = match self.exact(pc) {
            Some(name) => escape(name),
            None => match self.floor_below(pc) {
                Some((label_pc, label)) => format!("{} +{}", escape(label), pc - label_pc),
                None => pc.to_string(),
            },
        };

        self.cache.insert(pc, name.clone());
        name
    }

    pub fn is_empty(&self) -> bool {
        self.by_pc.is_empty()
    }
}

/// Escape `\` and `"` for use inside a double-quoted attribute
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
