use crate::dependency_graph::domain::DependencyGraph;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;

/// DiagramFormatter adapter emitting Graphviz DOT
///
/// The whole graph is exported; the root only matters for the tree views.
pub struct DiagramFormatter;

impl DiagramFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DiagramFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for DiagramFormatter {
    fn format(&self, graph: &DependencyGraph, _root: &str) -> Result<String> {
        Ok(graph.export_diagram())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_graph::domain::SyntheticRepository;

    #[test]
    fn test_diagram_formatter_output() {
        let repo = SyntheticRepository::parse("A: B\nB: A\n");
        let graph = DependencyGraph::build("A", &repo, 10);

        let output = DiagramFormatter::new().format(&graph, "A").unwrap();
        assert!(output.starts_with("strict digraph"));
        assert!(output.contains("// Cycles detected: 1"));
    }
}
