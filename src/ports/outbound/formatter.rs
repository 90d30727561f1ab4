use crate::dependency_graph::domain::DependencyGraph;
use crate::shared::Result;

/// GraphFormatter port for rendering a built graph
///
/// This port abstracts the output format (tree, list, diagram, JSON, ...).
pub trait GraphFormatter {
    /// Formats the graph that was built from `root`
    ///
    /// # Errors
    /// Returns an error if `root` is not part of the graph or if
    /// serialization fails
    fn format(&self, graph: &DependencyGraph, root: &str) -> Result<String>;
}
