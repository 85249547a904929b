//! Hover text for the node markers.
//!
//! One HTML snippet per node, produced in canonical node order so the strings
//! line up with the layout coordinates the figure assembler pairs them with.

use crate::network::Network;

/// Which edge directions the hover text lists.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationOptions {
    pub include_incoming: bool,
    pub include_outgoing: bool,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            include_incoming: true,
            include_outgoing: true,
        }
    }
}

/// Build the hover text for every node, in canonical node order.
///
/// Each string starts with the bold node name, followed by the incoming and
/// outgoing edge sections when enabled. An empty section reads "None".
pub fn hover_text(net: &Network, options: AnnotationOptions) -> Vec<String> {
    net.graph
        .node_indices()
        .map(|ix| {
            let mut text = format!("Node name: <b>{}</b>", net.graph[ix]);

            if options.include_incoming {
                text.push_str("<br><br>Incoming edges:");
                push_edge_lines(&mut text, &net.incoming(ix));
            }
            if options.include_outgoing {
                text.push_str("<br><br>Outgoing edges:");
                push_edge_lines(&mut text, &net.outgoing(ix));
            }
            text
        })
        .collect()
}

fn push_edge_lines(text: &mut String, edges: &[(String, f64)]) {
    if edges.is_empty() {
        text.push_str("<br>None");
        return;
    }
    for (label, weight) in edges {
        text.push_str(&format!(
            "<br><b>{}</b> - weight: {}",
            label,
            format_weight(*weight)
        ));
    }
}

// Weights always show a decimal point ("5.0", not "5"), as they would in the
// source spreadsheet.
pub(crate) fn format_weight(weight: f64) -> String {
    format!("{:?}", weight)
}
