//! Segment Trace Studio
//!
//! Segment graph rendering and execution trace statistics for
//! segmented zkVM traces.
//!
//! This crate provides the core implementation for the
//! `segment-graph` and `trace-report` CLI tools.
//!
//! ## Getting Started
//!
//! ```bash
//! segment-graph out.cbor | dot -Tpdf -o segments.pdf
//! trace-report out.cbor --pc-summary
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
