//! Output writers.
//!
//! This module handles rendering results as text:
//! - Graphviz segment graph
//! - Multi-section trace report

pub mod dot;
pub mod report;

// Re-export main functions
pub use dot::render_segment_graph;
pub use report::{
    render_value, write_chunks, write_folding, write_header, write_pc_costs, write_pc_summary,
    write_segments, write_summary, PcRunLine,
};
