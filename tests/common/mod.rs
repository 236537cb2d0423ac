//! CBOR fixture builders shared by the integration tests.
#![allow(dead_code)]

use ciborium::Value;
use segment_trace_studio::parser::{decode_document, Document};
use std::io::Write;
use tempfile::NamedTempFile;

pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

pub fn int(n: u64) -> Value {
    Value::Integer(n.into())
}

/// `[constraints, length, successors, from_network, to_network]`
pub fn segment(pc: Option<u64>, length: u64, succ: &[u64], from_net: bool, to_net: bool) -> Value {
    let constraints = match pc {
        Some(pc) => vec![Value::Array(vec![text("pc"), int(pc)])],
        None => Vec::new(),
    };
    Value::Array(vec![
        Value::Array(constraints),
        int(length),
        Value::Array(succ.iter().map(|&s| int(s)).collect()),
        Value::Bool(from_net),
        Value::Bool(to_net),
    ])
}

pub fn state_with_regs(pc: u64, regs: &[u64]) -> Value {
    Value::Map(vec![
        (text("pc"), int(pc)),
        (text("regs"), Value::Array(regs.iter().map(|&r| int(r)).collect())),
        (text("flag"), Value::Bool(false)),
    ])
}

/// `(segment_index, states)` with empty register files
pub fn chunk(segment: u64, pcs: &[u64]) -> Value {
    Value::Array(vec![
        int(segment),
        Value::Array(pcs.iter().map(|&pc| state_with_regs(pc, &[])).collect()),
    ])
}

pub struct DocBuilder {
    pub version: Vec<u64>,
    pub program_len: usize,
    pub segments: Vec<Value>,
    pub trace: Vec<Value>,
    pub labels: Option<Vec<(&'static str, u64)>>,
}

impl Default for DocBuilder {
    fn default() -> Self {
        Self {
            version: vec![0, 1, 4],
            program_len: 3,
            segments: Vec::new(),
            trace: Vec::new(),
            labels: None,
        }
    }
}

impl DocBuilder {
    pub fn to_value(&self) -> Value {
        let mut unit = vec![
            (text("params"), Value::Map(vec![])),
            (
                text("program"),
                Value::Array((0..self.program_len).map(|_| Value::Array(vec![text("nop")])).collect()),
            ),
            (text("segments"), Value::Array(self.segments.clone())),
            (text("advice"), Value::Map(vec![])),
            (text("trace"), Value::Array(self.trace.clone())),
        ];
        if let Some(labels) = &self.labels {
            let map = labels.iter().map(|(name, pc)| (text(name), int(*pc))).collect();
            unit.push((text("labels"), Value::Map(map)));
        }

        Value::Array(vec![
            Value::Array(self.version.iter().map(|&v| int(v)).collect()),
            Value::Array(vec![text("public-pc")]),
            Value::Map(unit),
        ])
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(&self.to_value(), &mut buf).unwrap();
        buf
    }

    pub fn decode(&self) -> Document {
        decode_document(self.to_bytes().as_slice()).unwrap()
    }

    pub fn write_file(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&self.to_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}

/// Two segments: public seg0 (pc 0, len 2) -> private seg1 (len 3, to network)
pub fn two_segment_doc() -> DocBuilder {
    DocBuilder {
        segments: vec![
            segment(Some(0), 2, &[1], false, false),
            segment(None, 3, &[], false, true),
        ],
        trace: vec![chunk(0, &[0, 1]), chunk(1, &[2, 3, 4])],
        ..Default::default()
    }
}
