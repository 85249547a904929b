//! Plotly figure assembly.
//!
//! Builds the declarative figure description (traces plus layout metadata) as
//! serde-serializable structs whose JSON is exactly what Plotly.js consumes,
//! and embeds the serialized figures in an HTML page that loads Plotly from
//! its CDN.

use serde::Serialize;

use crate::error::Result;
use crate::layout::circular_layout;
use crate::network::Network;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";
const CANVAS_SIZE: u32 = 1000;
const MARKER_SIZE: f64 = 15.0;
const EDGE_OPACITY: f64 = 0.5;

/// A renderable figure: traces plus layout metadata.
#[derive(Debug, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

/// One renderable layer: either an edge line trace or the node marker trace.
#[derive(Debug, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<Vec<Option<f64>>>,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub width: f64,
}

#[derive(Debug, Serialize)]
pub struct MarkerStyle {
    pub symbol: &'static str,
    pub size: f64,
    pub color: Vec<String>,
    pub line: LineStyle,
}

#[derive(Debug, Serialize)]
pub struct FigureLayout {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Arrow>,
}

/// An axis with every visible element turned off.
#[derive(Debug, Serialize)]
pub struct Axis {
    pub showline: bool,
    pub zeroline: bool,
    pub showgrid: bool,
    pub showticklabels: bool,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showbackground: Option<bool>,
}

impl Axis {
    fn hidden() -> Self {
        Axis {
            showline: false,
            zeroline: false,
            showgrid: false,
            showticklabels: false,
            title: "",
            showbackground: None,
        }
    }

    // Scene axes additionally carry the background pane toggle.
    fn hidden_3d() -> Self {
        Axis {
            showbackground: Some(false),
            ..Axis::hidden()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Scene {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
}

/// A direction arrow overlaid on one 2D edge.
#[derive(Debug, Serialize)]
pub struct Arrow {
    pub ax: f64,
    pub ay: f64,
    pub axref: &'static str,
    pub ayref: &'static str,
    pub x: f64,
    pub y: f64,
    pub xref: &'static str,
    pub yref: &'static str,
    pub showarrow: bool,
    pub arrowhead: u32,
    pub arrowsize: u32,
    pub width: u32,
    pub opacity: f64,
}

/// Assemble the network figure for the requested dimensionality
///
/// Produces one line trace per edge (line width equals the edge weight
/// exactly), a single marker trace for all nodes carrying the hover text, and
/// for 2D an arrow annotation per edge indicating direction.
///
/// # Arguments
/// * `net` - The network to render
/// * `dim` - Target dimensionality, 2 or 3
/// * `hover` - Hover text per node, in canonical node order
///
/// # Returns
/// * `Result<Figure>` - The figure, or `Error::UnsupportedDimension`
pub fn network_figure(net: &Network, dim: usize, hover: &[String]) -> Result<Figure> {
    let layout = circular_layout(net, dim)?;
    let weights = net.edge_weights();
    debug_assert_eq!(hover.len(), net.node_count());

    let kind = if dim == 2 { "scatter" } else { "scatter3d" };

    let mut data: Vec<Trace> = Vec::with_capacity(layout.edges.len() + 1);
    for (segment, weight) in layout.edges.iter().zip(&weights) {
        data.push(Trace {
            kind,
            x: segment.x.clone(),
            y: segment.y.clone(),
            z: segment.z.clone(),
            mode: "lines",
            hoverinfo: Some("none"),
            opacity: Some(EDGE_OPACITY),
            line: Some(LineStyle {
                color: "black",
                width: *weight,
            }),
            marker: None,
            text: None,
        });
    }

    data.push(Trace {
        kind,
        x: layout.nodes.iter().map(|c| Some(c[0])).collect(),
        y: layout.nodes.iter().map(|c| Some(c[1])).collect(),
        z: (dim == 3).then(|| layout.nodes.iter().map(|c| Some(c[2])).collect()),
        mode: "markers",
        hoverinfo: Some("text"),
        opacity: None,
        line: None,
        marker: Some(MarkerStyle {
            symbol: "circle",
            size: MARKER_SIZE,
            color: net.color_list(),
            line: LineStyle {
                color: "rgb(50,50,50)",
                width: 0.5,
            },
        }),
        text: Some(hover.to_vec()),
    });

    let fig_layout = if dim == 2 {
        let annotations = layout
            .edges
            .iter()
            .filter_map(|s| match (s.x[0], s.y[0], s.x[1], s.y[1]) {
                (Some(ax), Some(ay), Some(x), Some(y)) => Some(Arrow {
                    ax,
                    ay,
                    axref: "x",
                    ayref: "y",
                    x,
                    y,
                    xref: "x",
                    yref: "y",
                    showarrow: true,
                    arrowhead: 3,
                    arrowsize: 2,
                    width: 1,
                    opacity: EDGE_OPACITY,
                }),
                _ => None,
            })
            .collect();

        FigureLayout {
            title: "Network 2D".to_string(),
            width: CANVAS_SIZE,
            height: CANVAS_SIZE,
            showlegend: false,
            xaxis: Some(Axis::hidden()),
            yaxis: Some(Axis::hidden()),
            plot_bgcolor: Some("rgba(0,0,0,0)"),
            scene: None,
            annotations,
        }
    } else {
        FigureLayout {
            title: "Network 3D".to_string(),
            width: CANVAS_SIZE,
            height: CANVAS_SIZE,
            showlegend: false,
            xaxis: None,
            yaxis: None,
            plot_bgcolor: None,
            scene: Some(Scene {
                xaxis: Axis::hidden_3d(),
                yaxis: Axis::hidden_3d(),
                zaxis: Axis::hidden_3d(),
            }),
            annotations: Vec::new(),
        }
    };

    Ok(Figure {
        data,
        layout: fig_layout,
    })
}

/// Render a sequence of figures into a standalone HTML page
///
/// The page loads Plotly.js from its CDN and draws each figure into its own
/// div, in order. The result is returned as a string rather than written to a
/// shared file, so concurrent requests cannot clobber each other.
pub fn figures_page(figures: &[Figure]) -> Result<String> {
    let mut blocks = String::new();
    for (i, figure) in figures.iter().enumerate() {
        let data = escape_json(serde_json::to_string(&figure.data)?);
        let layout = escape_json(serde_json::to_string(&figure.layout)?);
        blocks.push_str(&format!(
            "    <div id=\"figure-{i}\"></div>\n    <script>Plotly.newPlot(\"figure-{i}\", {data}, {layout});</script>\n",
        ));
    }

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  <title>Network</title>\n  \
         <script src=\"{PLOTLY_CDN}\"></script>\n</head>\n<body>\n{blocks}</body>\n</html>\n",
    ))
}

// A "</" inside inline script content would terminate the script block early.
fn escape_json(json: String) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::{AnnotationOptions, hover_text};
    use crate::error::Error;
    use crate::loader::{EdgeRow, NodeRow};

    fn sample_net() -> Network {
        let nodes = vec![
            NodeRow {
                id: "1".to_string(),
                label: "A".to_string(),
                color: "red".to_string(),
            },
            NodeRow {
                id: "2".to_string(),
                label: "B".to_string(),
                color: "blue".to_string(),
            },
        ];
        let edges = vec![
            EdgeRow {
                source: "1".to_string(),
                target: "2".to_string(),
                weight: 5.0,
            },
            EdgeRow {
                source: "2".to_string(),
                target: "1".to_string(),
                weight: 0.5,
            },
        ];
        Network::from_tables(&nodes, &edges).unwrap()
    }

    fn sample_figure(dim: usize) -> Figure {
        let net = sample_net();
        let hover = hover_text(&net, AnnotationOptions::default());
        network_figure(&net, dim, &hover).unwrap()
    }

    #[test]
    fn test_one_line_trace_per_edge_plus_marker_trace() {
        let figure = sample_figure(2);
        assert_eq!(figure.data.len(), 3);
        assert!(figure.data[..2].iter().all(|t| t.mode == "lines"));
        assert_eq!(figure.data[2].mode, "markers");
    }

    #[test]
    fn test_line_width_equals_edge_weight_exactly() {
        let figure = sample_figure(2);
        let widths: Vec<f64> = figure.data[..2]
            .iter()
            .map(|t| t.line.as_ref().unwrap().width)
            .collect();
        assert_eq!(widths, vec![5.0, 0.5]);
    }

    #[test]
    fn test_marker_trace_carries_colors_and_text_in_node_order() {
        let figure = sample_figure(2);
        let marker_trace = &figure.data[2];
        let marker = marker_trace.marker.as_ref().unwrap();
        assert_eq!(marker.size, 15.0);
        assert_eq!(marker.color, vec!["red", "blue"]);
        let text = marker_trace.text.as_ref().unwrap();
        assert_eq!(text.len(), 2);
        assert!(text[0].contains("<b>A</b>"));
        assert!(text[1].contains("<b>B</b>"));
        assert_eq!(marker_trace.hoverinfo, Some("text"));
    }

    #[test]
    fn test_edge_traces_have_no_hover() {
        let figure = sample_figure(2);
        assert!(
            figure.data[..2]
                .iter()
                .all(|t| t.hoverinfo == Some("none") && t.opacity == Some(0.5))
        );
    }

    #[test]
    fn test_2d_layout_metadata() {
        let figure = sample_figure(2);
        let layout = &figure.layout;
        assert_eq!(layout.title, "Network 2D");
        assert_eq!((layout.width, layout.height), (1000, 1000));
        assert!(!layout.showlegend);
        assert_eq!(layout.plot_bgcolor, Some("rgba(0,0,0,0)"));
        assert!(layout.scene.is_none());
        assert_eq!(layout.annotations.len(), 2);
    }

    #[test]
    fn test_2d_arrows_point_from_source_to_target() {
        let figure = sample_figure(2);
        let arrow = &figure.layout.annotations[0];
        let first_edge = &figure.data[0];
        assert_eq!(arrow.ax, first_edge.x[0].unwrap());
        assert_eq!(arrow.ay, first_edge.y[0].unwrap());
        assert_eq!(arrow.x, first_edge.x[1].unwrap());
        assert_eq!(arrow.y, first_edge.y[1].unwrap());
        assert!(arrow.showarrow);
    }

    #[test]
    fn test_3d_layout_metadata() {
        let figure = sample_figure(3);
        let layout = &figure.layout;
        assert_eq!(layout.title, "Network 3D");
        assert!(layout.scene.is_some());
        assert!(layout.xaxis.is_none());
        assert!(layout.annotations.is_empty());
        assert!(figure.data.iter().all(|t| t.kind == "scatter3d"));
        assert!(figure.data.iter().all(|t| t.z.is_some()));
    }

    #[test]
    fn test_unsupported_dimension_propagates() {
        let net = sample_net();
        let hover = hover_text(&net, AnnotationOptions::default());
        assert!(matches!(
            network_figure(&net, 4, &hover),
            Err(Error::UnsupportedDimension(4))
        ));
    }

    #[test]
    fn test_sentinel_serializes_as_null() {
        let figure = sample_figure(2);
        let json = serde_json::to_string(&figure.data[0]).unwrap();
        assert!(json.contains("null"));
        assert!(json.contains("\"type\":\"scatter\""));
        // 2D traces must not carry a z key at all.
        assert!(!json.contains("\"z\""));
    }

    #[test]
    fn test_figures_page_embeds_each_figure() {
        let page = figures_page(&[sample_figure(2), sample_figure(3)]).unwrap();
        assert!(page.contains(PLOTLY_CDN));
        assert!(page.contains("figure-0"));
        assert!(page.contains("figure-1"));
        assert!(page.contains("Network 2D"));
        assert!(page.contains("Network 3D"));
    }

    #[test]
    fn test_page_escapes_script_terminators() {
        assert_eq!(
            escape_json("\"</script>\"".to_string()),
            "\"<\\/script>\""
        );
    }
}
