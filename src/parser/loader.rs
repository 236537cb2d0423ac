//! Document loader.
//!
//! Decodes the CBOR trace document from disk. No semantic validation is
//! performed here; see [`Document::check_references`].

use super::schema::Document;
use crate::utils::error::ParseError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load and decode a trace document from a file
///
/// # Errors
/// * `ParseError::Io` - File cannot be opened
/// * `ParseError::Decode` - Truncated or malformed CBOR
pub fn load_document(path: impl AsRef<Path>) -> Result<Document, ParseError> {
    let path = path.as_ref();

    info!("Loading trace document: {}", path.display());

    let file = File::open(path)?;
    let document = decode_document(BufReader::new(file))?;

    debug!(
        "Decoded document version {:?}: {} instructions, {} segments, {} trace chunks",
        document.version,
        document.unit.program.len(),
        document.segments().len(),
        document.trace().len()
    );

    Ok(document)
}

/// Decode a trace document from any reader
pub fn decode_document<R: Read>(reader: R) -> Result<Document, ParseError> {
    let document: Document = ciborium::de::from_reader(reader)?;
    Ok(document)
}
