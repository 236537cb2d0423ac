//! Statistics over the decoded trace.
//!
//! Every pass here is an independent fold over the trace:
//! - Summary counters (segment and cycle accounting)
//! - First join / secret / network detections
//! - Secret cycle cost rankings
//! - Contiguous pc range summarization

pub mod adjacency;
pub mod folding;
pub mod pc_cost;
pub mod pc_ranges;
pub mod summary;

// Re-export main types and functions
pub use adjacency::{segment_predecessors, TraceAdjacency};
pub use folding::{folding_stats, FoldingStats};
pub use pc_cost::{public_pc_stats, CycleTally, PcCostStats};
pub use pc_ranges::{function_args, single_chunk_states, summarize_pc_ranges, PcRun};
pub use summary::{summarize, CategoryStats, TraceSummary};
