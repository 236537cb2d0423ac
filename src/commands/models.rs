use crate::utils::config::DEFAULT_TRACE_PATH;
use std::path::PathBuf;

/// Arguments for the report command
///
/// **Public** - used by the `trace-report` binary to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Input CBOR document
    pub input: PathBuf,

    /// Print segments `[segments_from, segments_to)` after the summary
    pub segments_to: Option<usize>,
    pub segments_from: usize,

    /// Print the chunk-by-chunk trace overview
    pub print_chunks: bool,

    /// Stop the chunk overview after this many cycles
    pub chunk_bound: Option<usize>,

    /// Print the contiguous pc range summary
    pub pc_summary: bool,

    /// Soft step bound for the pc range summary
    pub cutoff: Option<usize>,

    /// Recover function arguments at labelled run starts
    pub fun_args: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_TRACE_PATH),
            segments_to: None,
            segments_from: 0,
            print_chunks: false,
            chunk_bound: None,
            pc_summary: false,
            cutoff: None,
            fun_args: false,
        }
    }
}

/// Arguments for the graph command
#[derive(Debug, Clone)]
pub struct GraphArgs {
    /// Input CBOR document
    pub input: PathBuf,
}
