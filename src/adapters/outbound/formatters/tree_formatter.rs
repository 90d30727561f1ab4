use crate::dependency_graph::domain::DependencyGraph;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;

/// TreeFormatter adapter rendering the box-drawing dependency tree
pub struct TreeFormatter;

impl TreeFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for TreeFormatter {
    fn format(&self, graph: &DependencyGraph, root: &str) -> Result<String> {
        Ok(graph.render_tree(root)?)
    }
}
