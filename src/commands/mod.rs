//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod graph;
pub mod models;
pub mod report;

// Re-export main command functions
pub use graph::execute_graph;
pub use models::{GraphArgs, ReportArgs};
pub use report::{execute_report, pc_summary_lines, validate_args};
