//! Decoded trace document definitions.
//!
//! The document is a CBOR array `[version, features, compilation_unit]`.
//! Segments, constraints and trace chunks are positional arrays on the
//! wire, so each is decoded through a tuple shape and converted into a
//! named struct.

use crate::utils::config::{LABELS_MIN_VERSION, PC_CONSTRAINT_KIND};
use crate::utils::error::ParseError;
use ciborium::Value;
use log::debug;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// Top-level decoded document
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawDocument")]
pub struct Document {
    /// Format version tuple (e.g. `[0, 1, 4]`)
    pub version: Vec<u64>,

    /// Feature flags, opaque to this tool
    pub features: Value,

    /// The compilation unit with program, segments and trace
    pub unit: CompilationUnit,
}

#[derive(Deserialize)]
struct RawDocument(Vec<u64>, Value, CompilationUnit);

impl From<RawDocument> for Document {
    fn from(RawDocument(version, features, mut unit): RawDocument) -> Self {
        if !labels_supported(&version) && unit.labels.take().is_some() {
            debug!("Ignoring label map in document version {:?}", version);
        }
        Self {
            version,
            features,
            unit,
        }
    }
}

/// Whether a document of this version carries a label map
pub fn labels_supported(version: &[u64]) -> bool {
    version.get(2).is_some_and(|minor| *minor >= LABELS_MIN_VERSION)
}

/// Compilation unit: the program, its segments and the recorded trace
#[derive(Debug, Clone, Deserialize)]
pub struct CompilationUnit {
    /// Prover parameters, opaque
    #[serde(default)]
    pub params: Option<Value>,

    /// Program instructions; only the count matters here
    #[serde(default)]
    pub program: Vec<Value>,

    /// Statically declared segments, indexed by position
    #[serde(default)]
    pub segments: Vec<Segment>,

    /// Advice map, opaque
    #[serde(default)]
    pub advice: Option<Value>,

    /// Label name -> program counter (absent before version x.x.4)
    #[serde(default)]
    pub labels: Option<BTreeMap<String, u64>>,

    /// Executed segments in order
    #[serde(default)]
    pub trace: Vec<TraceChunk>,
}

/// A single segment constraint `(kind, value)`
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(String, Value)")]
pub struct Constraint {
    pub kind: String,
    pub value: Value,
}

impl From<(String, Value)> for Constraint {
    fn from((kind, value): (String, Value)) -> Self {
        Self { kind, value }
    }
}

/// Statically declared segment
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawSegment")]
pub struct Segment {
    pub constraints: Vec<Constraint>,

    /// Cycle count of the segment
    pub length: u64,

    /// Segments statically reachable from this one
    pub successors: BTreeSet<usize>,

    /// Execution may enter from the network boundary
    pub from_network: bool,

    /// Execution may leave to the network boundary
    pub to_network: bool,
}

#[derive(Deserialize)]
struct RawSegment(Vec<Constraint>, u64, BTreeSet<usize>, bool, bool);

impl From<RawSegment> for Segment {
    fn from(RawSegment(constraints, length, successors, from_network, to_network): RawSegment) -> Self {
        Self {
            constraints,
            length,
            successors,
            from_network,
            to_network,
        }
    }
}

impl Segment {
    /// Entry pc of a public segment. The first `pc` constraint wins.
    pub fn public_pc(&self) -> Option<u64> {
        let constraint = self
            .constraints
            .iter()
            .find(|c| c.kind == PC_CONSTRAINT_KIND)?;
        match &constraint.value {
            Value::Integer(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    pub fn is_public(&self) -> bool {
        self.public_pc().is_some()
    }
}

/// One contiguous run of states belonging to a single segment
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(usize, Vec<State>)")]
pub struct TraceChunk {
    pub segment: usize,
    pub states: Vec<State>,
}

impl From<(usize, Vec<State>)> for TraceChunk {
    fn from((segment, states): (usize, Vec<State>)) -> Self {
        Self { segment, states }
    }
}

/// Per-cycle machine state snapshot. Fields other than `pc` and `regs`
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct State {
    pub pc: u64,

    #[serde(default)]
    pub regs: Vec<u64>,
}

impl Document {
    pub fn segments(&self) -> &[Segment] {
        &self.unit.segments
    }

    pub fn trace(&self) -> &[TraceChunk] {
        &self.unit.trace
    }

    /// Label map, `None` when the document predates labels
    pub fn labels(&self) -> Option<&BTreeMap<String, u64>> {
        self.unit.labels.as_ref()
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.unit.segments.get(index)
    }

    /// Whether the segment at `index` exists and is public
    pub fn is_public(&self, index: usize) -> bool {
        self.segment(index).is_some_and(Segment::is_public)
    }

    /// Declared length of the segment at `index` (0 if it does not exist)
    pub fn segment_len(&self, index: usize) -> u64 {
        self.segment(index).map_or(0, |s| s.length)
    }

    /// Total number of executed cycles
    pub fn total_cycles(&self) -> usize {
        self.trace().iter().map(|c| c.states.len()).sum()
    }

    /// Check that every trace chunk and successor points at a real segment,
    /// and that every `pc` constraint carries a non-negative integer
    ///
    /// The decoder itself performs no semantic validation; commands run this
    /// before any analysis.
    pub fn check_references(&self) -> Result<(), ParseError> {
        let count = self.segments().len();

        for (pos, chunk) in self.trace().iter().enumerate() {
            if chunk.segment >= count {
                return Err(ParseError::InvalidFormat(format!(
                    "trace chunk {} references segment {} but only {} segments exist",
                    pos, chunk.segment, count
                )));
            }
        }

        for (i, seg) in self.segments().iter().enumerate() {
            let pc_constraint = seg.constraints.iter().find(|c| c.kind == PC_CONSTRAINT_KIND);
            if pc_constraint.is_some() && seg.public_pc().is_none() {
                return Err(ParseError::InvalidFormat(format!(
                    "segment {} has a pc constraint that is not a non-negative integer",
                    i
                )));
            }

            if let Some(bad) = seg.successors.iter().find(|&&j| j >= count) {
                return Err(ParseError::InvalidFormat(format!(
                    "segment {} declares successor {} but only {} segments exist",
                    i, bad, count
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pc_constraint(pc: u64) -> Constraint {
        Constraint {
            kind: "pc".to_string(),
            value: Value::Integer(pc.into()),
        }
    }

    fn segment(constraints: Vec<Constraint>) -> Segment {
        Segment {
            constraints,
            length: 1,
            successors: BTreeSet::new(),
            from_network: false,
            to_network: false,
        }
    }

    #[test]
    fn test_public_pc_first_wins() {
        let seg = segment(vec![pc_constraint(7), pc_constraint(9)]);
        assert_eq!(seg.public_pc(), Some(7));
        assert!(seg.is_public());
    }

    #[test]
    fn test_public_pc_ignores_other_kinds() {
        let other = Constraint {
            kind: "mem".to_string(),
            value: Value::Integer(3.into()),
        };
        let seg = segment(vec![other.clone()]);
        assert_eq!(seg.public_pc(), None);

        let seg = segment(vec![other, pc_constraint(12)]);
        assert_eq!(seg.public_pc(), Some(12));
    }

    #[test]
    fn test_labels_supported() {
        assert!(labels_supported(&[0, 1, 4]));
        assert!(labels_supported(&[1, 0, 9]));
        assert!(!labels_supported(&[0, 1, 3]));
        assert!(!labels_supported(&[0, 1]));
    }
}
