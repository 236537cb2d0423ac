//! Graphviz rendering of the segment graph.
//!
//! Nodes are public segments plus synthetic network boundary nodes. Edges
//! and nodes the trace actually exercised are green; the concrete
//! segment reached through a network boundary is shown in blue.
//!
//! Usage: `segment-graph out.cbor | dot -Tpdf -o segments.pdf`

use crate::aggregator::TraceAdjacency;
use crate::parser::{Document, LabelResolver};
use log::debug;
use std::fmt::Write;

/// Render the segment graph as a `digraph` description
pub fn render_segment_graph(doc: &Document) -> String {
    let adjacency = TraceAdjacency::from_document(doc);
    let mut names = LabelResolver::from_document(doc);
    let mut dot = String::from("digraph {\n");
    let mut emitted = 0usize;

    for (i, seg) in doc.segments().iter().enumerate() {
        let Some(pc) = seg.public_pc() else {
            continue;
        };
        emitted += 1;

        let used_from_net = adjacency.used_from_network(doc, i);
        let used_to_net = adjacency.used_to_network(doc, i);
        let next = adjacency.next_seg.get(&i).copied();

        let label = format!("{}: {}", i, names.pc_name(pc));
        let _ = writeln!(
            dot,
            "seg{i} {};",
            attrs(Some(label.as_str()), green(adjacency.seen.contains(&i)))
        );

        if seg.from_network {
            let _ = writeln!(dot, "fromnet{i} {};", attrs(Some("*"), green(used_from_net)));
            let _ = writeln!(dot, "fromnet{i} -> seg{i} {};", attrs(None, green(used_from_net)));
        }
        if seg.to_network {
            let _ = writeln!(dot, "tonet{i} {};", attrs(Some("*"), green(used_to_net)));
            let _ = writeln!(dot, "seg{i} -> tonet{i} {};", attrs(None, green(used_to_net)));
        }

        for &j in &seg.successors {
            let _ = writeln!(dot, "seg{i} -> seg{j} {};", attrs(None, green(next == Some(j))));
        }

        if seg.to_network && used_to_net {
            if let Some(dest) = next {
                let to = format!("to {dest}");
                let _ = writeln!(dot, "netdest{i} {};", attrs(Some(to.as_str()), Some("blue")));
                let _ = writeln!(dot, "tonet{i} -> netdest{i} {};", attrs(None, Some("blue")));
            }
        }

        if seg.from_network && used_from_net {
            if let Some(src) = adjacency.prev_seg.get(&i) {
                let from = format!("from {src}");
                let _ = writeln!(dot, "netsrc{i} {};", attrs(Some(from.as_str()), Some("blue")));
                let _ = writeln!(dot, "netsrc{i} -> fromnet{i} {};", attrs(None, Some("blue")));
            }
        }
    }

    dot.push_str("}\n");
    debug!("Rendered {} public segments", emitted);
    dot
}

fn green(flag: bool) -> Option<&'static str> {
    flag.then_some("green")
}

/// Attribute list `[ label = "..", color = ".." ]`
///
/// `label` must already be escaped.
fn attrs(label: Option<&str>, color: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(label) = label {
        parts.push(format!("label = \"{label}\""));
    }
    if let Some(color) = color {
        parts.push(format!("color = \"{color}\""));
    }
    format!("[ {} ]", parts.join(", "))
}
