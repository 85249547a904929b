//! Directed network model built from the loaded tables.
//!
//! Wraps a petgraph `DiGraph` whose node weights are the display labels and
//! whose edge weights are the scalar edge weights. Node insertion order (first
//! appearance in the edge table) is the canonical order every later pipeline
//! stage reuses, so coordinates, hover text, and marker colors line up.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::loader::{EdgeRow, NodeRow};

/// A directed, weighted network ready for layout and annotation.
pub struct Network {
    /// Node weight is the node's label, edge weight the edge's scalar weight.
    pub graph: DiGraph<String, f64>,
    /// Maps label to marker color, composed from the id keyed node table.
    pub colors: HashMap<String, String>,
}

impl Network {
    /// Build a network from the node and edge tables.
    ///
    /// Each edge row becomes one directed edge; duplicate `(source, target)`
    /// pairs are last-write-wins on weight. Every edge endpoint must appear in
    /// the node table (`Error::MissingNode` otherwise), and the labels of the
    /// referenced nodes must be unique (`Error::DuplicateLabel` otherwise).
    pub fn from_tables(nodes: &[NodeRow], edges: &[EdgeRow]) -> Result<Network> {
        // Duplicate ids in the node table are last-write-wins, matching the
        // edge collapse semantics.
        let mut labels: HashMap<String, String> = HashMap::new();
        let mut colors_by_id: HashMap<String, String> = HashMap::new();
        for node in nodes {
            labels.insert(node.id.clone(), node.label.clone());
            colors_by_id.insert(node.id.clone(), node.color.clone());
        }

        // Graph keyed by id first; nodes enter in first-seen edge-table order.
        let mut graph: DiGraph<String, f64> = DiGraph::new();
        let mut index: HashMap<String, NodeIndex> = HashMap::new();
        for edge in edges {
            let source = ensure_node(&mut graph, &mut index, &edge.source);
            let target = ensure_node(&mut graph, &mut index, &edge.target);
            graph.update_edge(source, target, edge.weight);
        }

        for ix in graph.node_indices() {
            if !labels.contains_key(&graph[ix]) {
                return Err(Error::MissingNode(graph[ix].clone()));
            }
        }

        // Colors must be composed while ids are still the node identities.
        let colors = graph
            .node_indices()
            .map(|ix| {
                let id = &graph[ix];
                (labels[id.as_str()].clone(), colors_by_id[id.as_str()].clone())
            })
            .collect();

        let graph = relabel(graph, &labels)?;

        log::debug!(
            "built network: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Network { graph, colors })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node labels in canonical order.
    pub fn labels(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|ix| self.graph[ix].as_str())
            .collect()
    }

    /// Marker colors in canonical node order.
    pub fn color_list(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|ix| self.colors[self.graph[ix].as_str()].clone())
            .collect()
    }

    /// Edge weights in edge insertion order.
    pub fn edge_weights(&self) -> Vec<f64> {
        self.graph.edge_references().map(|e| *e.weight()).collect()
    }

    /// Incoming edges of a node as (source label, weight), sorted by label.
    pub fn incoming(&self, ix: NodeIndex) -> Vec<(String, f64)> {
        self.neighbor_edges(ix, Direction::Incoming)
    }

    /// Outgoing edges of a node as (target label, weight), sorted by label.
    pub fn outgoing(&self, ix: NodeIndex) -> Vec<(String, f64)> {
        self.neighbor_edges(ix, Direction::Outgoing)
    }

    fn neighbor_edges(&self, ix: NodeIndex, dir: Direction) -> Vec<(String, f64)> {
        let mut edges: Vec<(String, f64)> = self
            .graph
            .edges_directed(ix, dir)
            .map(|e| {
                let neighbor = match dir {
                    Direction::Incoming => e.source(),
                    Direction::Outgoing => e.target(),
                };
                (self.graph[neighbor].clone(), *e.weight())
            })
            .collect();
        // Sorted by neighbor label so hover text is deterministic.
        edges.sort_by(|a, b| a.0.cmp(&b.0));
        edges
    }
}

fn ensure_node(
    graph: &mut DiGraph<String, f64>,
    index: &mut HashMap<String, NodeIndex>,
    id: &str,
) -> NodeIndex {
    match index.get(id) {
        Some(&ix) => ix,
        None => {
            let ix = graph.add_node(id.to_string());
            index.insert(id.to_string(), ix);
            ix
        }
    }
}

/// Relabel every node of `graph` through `mapping`, keeping structure intact.
///
/// Node indices, edge count, and edge weights are preserved exactly. Fails
/// with `Error::MissingNode` when a node has no mapping entry and with
/// `Error::DuplicateLabel` when two nodes map to the same label, since that
/// would silently merge them.
pub fn relabel(
    graph: DiGraph<String, f64>,
    mapping: &HashMap<String, String>,
) -> Result<DiGraph<String, f64>> {
    let mut seen: HashSet<&str> = HashSet::new();
    for ix in graph.node_indices() {
        let label = mapping
            .get(&graph[ix])
            .ok_or_else(|| Error::MissingNode(graph[ix].clone()))?;
        if !seen.insert(label) {
            return Err(Error::DuplicateLabel(label.clone()));
        }
    }

    Ok(graph.map(|_, id| mapping[id.as_str()].clone(), |_, w| *w))
}
