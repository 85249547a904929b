/*!
# Netgrid

A browser-based network visualization application, built in Rust.

## Overview

Netgrid accepts an uploaded `.xlsx` workbook describing a directed, weighted
graph (a "nodes" sheet and an "edges" sheet) and renders interactive 2D and 3D
network figures in the browser with Plotly.js.

The core is a stateless transformation pipeline; each stage is a pure function
of its inputs:

spreadsheet → tables → directed graph → circular layout → hover text → figure

## Architecture

### Pipeline Layer
- **Table Loader** - Reads the two sheets into row-oriented tables (calamine)
- **Graph Builder** - Directed graph with relabeling and color mapping (petgraph)
- **Layout Engine** - Circular layout in 2 or 3 dimensions
- **Annotation Builder** - Per-node hover text listing incoming/outgoing edges
- **Figure Assembler** - Plotly trace and layout JSON plus HTML embedding

### Web Layer (feature `web`)
- **Technologies**: axum, tokio
- Upload endpoint with extension validation, render endpoint returning the
  figure page per request

## Modules

- **config**: column name mapping and server configuration
- **error**: pipeline error kinds and their HTTP mapping
- **loader**: workbook reading and table extraction
- **network**: directed graph construction, relabeling, color composition
- **layout**: circular layout and sentinel-terminated edge segments
- **annotate**: hover text generation
- **figure**: figure assembly and HTML page rendering
- **app**: routing and handlers

## Key Invariants

- A single canonical node order (first appearance in the edge table) is fixed
  at graph construction and reused by layout, annotation, and figure assembly,
  so coordinates, hover text, and marker colors always correspond.
- Duplicate `(source, target)` edge rows are last-write-wins on weight.
- Node labels must be unique; colliding labels fail instead of silently
  merging nodes.
*/

pub mod annotate;
#[cfg(feature = "web")]
pub mod app;
pub mod config;
pub mod error;
pub mod figure;
pub mod layout;
pub mod loader;
pub mod network;

/// Re-export the pipeline types for convenience
pub use annotate::*;
pub use config::*;
pub use error::*;
pub use figure::*;
pub use layout::*;
pub use loader::*;
pub use network::*;

use std::path::Path;

/// Run the full pipeline on a workbook and return the rendered HTML page
///
/// Loads the tables, builds the network, and assembles the 2D and 3D figures
/// (in that order) into one page.
///
/// # Arguments
/// * `path` - Path to the `.xlsx` workbook
/// * `names` - Column name configuration
///
/// # Returns
/// * `Result<String>` - The HTML page, or the first pipeline error
pub fn render_network_page(path: impl AsRef<Path>, names: &ColumnNames) -> Result<String> {
    let sheets = loader::load_workbook(path, names)?;
    let net = Network::from_tables(&sheets.nodes, &sheets.edges)?;
    let hover = hover_text(&net, AnnotationOptions::default());

    let fig2d = network_figure(&net, 2, &hover)?;
    let fig3d = network_figure(&net, 3, &hover)?;
    figures_page(&[fig2d, fig3d])
}
