use crate::dependency_graph::domain::DependencyGraph;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// StatsFormatter adapter summarizing the graph in a few lines
pub struct StatsFormatter;

impl StatsFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StatsFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for StatsFormatter {
    fn format(&self, graph: &DependencyGraph, root: &str) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "Package: {}", root)?;
        writeln!(output, "Nodes: {}", graph.node_count())?;
        writeln!(output, "Edges: {}", graph.edge_count())?;
        if let Some(max_depth) = graph.max_depth() {
            writeln!(output, "Max depth: {}", max_depth)?;
        }

        let truncated = graph.truncated_nodes();
        if truncated.is_empty() {
            writeln!(output, "Truncated: none")?;
        } else {
            let ids: Vec<&str> = truncated.iter().map(String::as_str).collect();
            writeln!(output, "Truncated: {} ({})", ids.len(), ids.join(", "))?;
        }

        writeln!(output, "Cycles: {}", graph.cycles().len())?;
        for (index, cycle) in graph.cycles().iter().enumerate() {
            writeln!(output, "  {}. {}", index + 1, cycle)?;
        }

        Ok(output)
    }
}
