//! Trace document decoding and schema definitions.
//!
//! This module handles:
//! - Decoding the CBOR document from disk
//! - Defining the segment / trace schema
//! - Resolving program counters to label names

pub mod labels;
pub mod loader;
pub mod schema;

// Re-export main types
pub use labels::LabelResolver;
pub use loader::{decode_document, load_document};
pub use schema::{CompilationUnit, Constraint, Document, Segment, State, TraceChunk};
