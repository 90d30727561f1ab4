use crate::dependency_graph::domain::{DependencyCycle, DependencyGraph};
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct GraphDocument<'a> {
    #[serde(rename = "generatedAt")]
    generated_at: String,
    tool: Tool,
    root: &'a str,
    #[serde(rename = "maxDepth", skip_serializing_if = "Option::is_none")]
    max_depth: Option<usize>,
    #[serde(rename = "nodeCount")]
    node_count: usize,
    #[serde(rename = "edgeCount")]
    edge_count: usize,
    nodes: Vec<&'a str>,
    edges: Vec<Edge<'a>>,
    cycles: &'a [DependencyCycle],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    truncated: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct Edge<'a> {
    source: &'a str,
    target: &'a str,
}

/// JsonFormatter adapter serializing the graph with serde_json
///
/// Nodes and edges are emitted sorted, so two runs over the same input
/// differ only in `generatedAt`.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for JsonFormatter {
    fn format(&self, graph: &DependencyGraph, root: &str) -> Result<String> {
        let document = GraphDocument {
            generated_at: Utc::now().to_rfc3339(),
            tool: Tool {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            root,
            max_depth: graph.max_depth(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            nodes: graph.nodes().collect(),
            edges: graph
                .edges()
                .map(|(source, target)| Edge { source, target })
                .collect(),
            cycles: graph.cycles(),
            truncated: graph.truncated_nodes().iter().map(String::as_str).collect(),
        };

        let mut json = serde_json::to_string_pretty(&document)?;
        json.push('\n');
        Ok(json)
    }
}
