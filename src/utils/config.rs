//! Configuration and constants for the CLI.

use std::ops::Range;

/// Input used by `trace-report` when no path is given
pub const DEFAULT_TRACE_PATH: &str = "Output/out_test.cbor";

/// First format minor version (`version[2]`) that carries the label map
pub const LABELS_MIN_VERSION: u64 = 4;

/// Constraint kind marking a segment as public; its value is the entry pc
pub const PC_CONSTRAINT_KIND: &str = "pc";

/// Number of entries shown in each "most expensive" ranking
pub const TOP_N: usize = 5;

// Function arguments live in registers 10..14 at a call boundary
// (first four argument registers of the calling convention)
pub const ARG_REGISTERS: Range<usize> = 10..14;
