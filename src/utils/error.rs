//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in the binaries and commands.

use thiserror::Error;

/// Errors that can occur while loading the trace document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("CBOR decoding failed: {0}")]
    Decode(#[from] ciborium::de::Error<std::io::Error>),

    #[error("Invalid document: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur while running the trace analyses
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Argument recovery needs a single-chunk trace, found {0} chunks")]
    MultipleChunks(usize),

    #[error("Step {step} is outside the trace ({len} states)")]
    StepOutOfRange { step: usize, len: usize },

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),
}
