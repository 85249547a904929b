//! Circular layout for the network.
//!
//! Nodes are spaced evenly on the unit circle in canonical node order; the 3D
//! variant embeds the same circle in the z = 0 plane. Edge coordinates come
//! out as sentinel-terminated segments (a trailing `None` per segment) so
//! Plotly can draw disjoint lines in a single call.

use petgraph::visit::EdgeRef;
use std::f64::consts::TAU;

use crate::error::{Error, Result};
use crate::network::Network;

/// Per-axis coordinates of one edge: start, end, then the `None` sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSegment {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    /// Present only for 3D layouts.
    pub z: Option<Vec<Option<f64>>>,
}

/// Coordinates for every node and every edge, in canonical order.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub dim: usize,
    /// One coordinate tuple per node; inner length equals `dim`.
    pub nodes: Vec<Vec<f64>>,
    /// One sentinel-terminated segment per edge, in edge insertion order.
    pub edges: Vec<EdgeSegment>,
}

/// Compute a circular layout for `net` in the requested dimensionality.
///
/// Fails with `Error::UnsupportedDimension` for any dimension other than
/// 2 or 3. A single node sits at the origin.
pub fn circular_layout(net: &Network, dim: usize) -> Result<LayoutResult> {
    if dim != 2 && dim != 3 {
        return Err(Error::UnsupportedDimension(dim));
    }

    let count = net.node_count();
    let mut nodes = Vec::with_capacity(count);
    for i in 0..count {
        let mut coords = if count == 1 {
            vec![0.0, 0.0]
        } else {
            let theta = TAU * i as f64 / count as f64;
            vec![theta.cos(), theta.sin()]
        };
        if dim == 3 {
            coords.push(0.0);
        }
        nodes.push(coords);
    }

    let edges = net
        .graph
        .edge_references()
        .map(|e| {
            let from = &nodes[e.source().index()];
            let to = &nodes[e.target().index()];
            EdgeSegment {
                x: vec![Some(from[0]), Some(to[0]), None],
                y: vec![Some(from[1]), Some(to[1]), None],
                z: (dim == 3).then(|| vec![Some(from[2]), Some(to[2]), None]),
            }
        })
        .collect();

    Ok(LayoutResult { dim, nodes, edges })
}
