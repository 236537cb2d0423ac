mod common;

use ciborium::Value;
use common::{chunk, int, segment, text, two_segment_doc, DocBuilder};
use segment_trace_studio::parser::{decode_document, load_document, LabelResolver};
use segment_trace_studio::utils::error::ParseError;

#[test]
fn test_decode_two_segment_document() {
    let doc = two_segment_doc().decode();

    assert_eq!(doc.version, vec![0, 1, 4]);
    assert_eq!(doc.unit.program.len(), 3);
    assert_eq!(doc.segments().len(), 2);
    assert_eq!(doc.segments()[0].public_pc(), Some(0));
    assert_eq!(doc.segments()[0].length, 2);
    assert!(doc.segments()[0].successors.contains(&1));
    assert_eq!(doc.segments()[1].public_pc(), None);
    assert!(doc.segments()[1].to_network);

    assert_eq!(doc.trace().len(), 2);
    assert_eq!(doc.trace()[1].segment, 1);
    let pcs: Vec<u64> = doc.trace()[1].states.iter().map(|s| s.pc).collect();
    assert_eq!(pcs, vec![2, 3, 4]);
    assert_eq!(doc.total_cycles(), 5);
}

#[test]
fn test_labels_read_from_version_4() {
    let doc = DocBuilder {
        labels: Some(vec![("main", 0)]),
        ..two_segment_doc()
    }
    .decode();

    assert_eq!(doc.labels().and_then(|l| l.get("main")).copied(), Some(0));
}

#[test]
fn test_labels_ignored_before_version_4() {
    let doc = DocBuilder {
        version: vec![0, 1, 3],
        labels: Some(vec![("main", 0)]),
        ..two_segment_doc()
    }
    .decode();

    assert!(doc.labels().is_none());
    assert!(LabelResolver::from_document(&doc).is_empty());
}

#[test]
fn test_missing_labels_tolerated() {
    let doc = DocBuilder {
        version: vec![0, 1, 2],
        ..two_segment_doc()
    }
    .decode();

    assert!(doc.labels().is_none());
}

#[test]
fn test_truncated_document_fails() {
    let bytes = two_segment_doc().to_bytes();
    let truncated = &bytes[..bytes.len() / 2];

    let result = decode_document(truncated);
    assert!(matches!(result, Err(ParseError::Decode(_))));
}

#[test]
fn test_load_document_from_file() {
    let file = two_segment_doc().write_file();
    let doc = load_document(file.path()).unwrap();
    assert_eq!(doc.segments().len(), 2);
}

#[test]
fn test_load_document_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_document(dir.path().join("absent.cbor"));
    assert!(matches!(result, Err(ParseError::Io(_))));
}

#[test]
fn test_check_references_accepts_valid_document() {
    let doc = two_segment_doc().decode();
    assert!(doc.check_references().is_ok());
}

#[test]
fn test_check_references_rejects_unknown_trace_segment() {
    let doc = DocBuilder {
        trace: vec![chunk(0, &[0]), chunk(5, &[1])],
        ..two_segment_doc()
    }
    .decode();

    let err = doc.check_references().unwrap_err();
    assert!(matches!(err, ParseError::InvalidFormat(_)));
    assert!(err.to_string().contains("segment 5"));
}

#[test]
fn test_check_references_rejects_dangling_successor() {
    let doc = DocBuilder {
        segments: vec![segment(Some(0), 1, &[3], false, false)],
        trace: vec![chunk(0, &[0])],
        ..Default::default()
    }
    .decode();

    assert!(doc.check_references().is_err());
}

#[test]
fn test_check_references_rejects_malformed_pc_constraint() {
    for bad in [text("abc"), Value::Integer((-1).into())] {
        let seg = Value::Array(vec![
            Value::Array(vec![Value::Array(vec![text("pc"), bad])]),
            int(1),
            Value::Array(vec![]),
            Value::Bool(false),
            Value::Bool(false),
        ]);
        let doc = DocBuilder {
            segments: vec![seg],
            trace: vec![chunk(0, &[0])],
            ..Default::default()
        }
        .decode();

        assert!(!doc.segments()[0].is_public());
        let err = doc.check_references().unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
        assert!(err.to_string().contains("pc constraint"));
    }
}
