use crate::dependency_graph::domain::{DependencyGraph, GraphError};
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;

/// ListFormatter adapter printing one package id per line
///
/// Without a reverse target it lists every transitive dependency of the
/// root; with one it lists every package that transitively depends on the
/// target. Lines are sorted.
pub struct ListFormatter {
    reverse_target: Option<String>,
}

impl ListFormatter {
    pub fn new() -> Self {
        Self {
            reverse_target: None,
        }
    }

    pub fn dependents_of(target: impl Into<String>) -> Self {
        Self {
            reverse_target: Some(target.into()),
        }
    }
}

impl Default for ListFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for ListFormatter {
    fn format(&self, graph: &DependencyGraph, root: &str) -> Result<String> {
        let ids = match &self.reverse_target {
            Some(target) => {
                if !graph.contains_node(target) {
                    return Err(GraphError::NodeNotFound(target.clone()).into());
                }
                graph.transitive_dependents(target)
            }
            None => graph.transitive_dependencies(root),
        };

        let mut output = String::new();
        for id in ids {
            output.push_str(&id);
            output.push('\n');
        }
        Ok(output)
    }
}
