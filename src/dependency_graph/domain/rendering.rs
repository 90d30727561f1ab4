//! Textual renderings of a [`DependencyGraph`]: a box-drawing tree and a
//! Graphviz DOT diagram.

use super::DependencyGraph;
use std::collections::HashSet;
use std::fmt::Write;
use thiserror::Error;

const BRANCH: &str = "├── ";
const CORNER: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Marker appended to a node that is already on the current render path
pub const CIRCULAR_MARKER: &str = "(circular)";

/// Stroke applied to edges that take part in a detected cycle
const CYCLE_EDGE_STYLE: &str = "[color=\"red\", penwidth=2.0]";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Package '{0}' was not found in the dependency graph")]
    NodeNotFound(String),
}

enum RenderFrame<'a> {
    Enter {
        node: &'a str,
        prefix: String,
        is_last: bool,
        is_root: bool,
    },
    Leave(&'a str),
}

impl DependencyGraph {
    /// Renders the graph below `root` as a tree
    ///
    /// ```text
    /// A
    /// ├── B
    /// │   └── C
    /// │       └── A (circular)
    /// └── D
    /// ```
    ///
    /// Children are sorted. Shared dependencies are printed under every
    /// parent; only nodes already on the current path are cut short.
    pub fn render_tree(&self, root: &str) -> Result<String, GraphError> {
        let root = self
            .resolve_node(root)
            .ok_or_else(|| GraphError::NodeNotFound(root.to_string()))?;

        let mut output = String::new();
        let mut on_path: HashSet<&str> = HashSet::new();
        let mut stack = vec![RenderFrame::Enter {
            node: root,
            prefix: String::new(),
            is_last: true,
            is_root: true,
        }];

        while let Some(frame) = stack.pop() {
            let (node, prefix, is_last, is_root) = match frame {
                RenderFrame::Leave(node) => {
                    on_path.remove(node);
                    continue;
                }
                RenderFrame::Enter {
                    node,
                    prefix,
                    is_last,
                    is_root,
                } => (node, prefix, is_last, is_root),
            };

            if !is_root {
                output.push_str(&prefix);
                output.push_str(if is_last { CORNER } else { BRANCH });
            }
            output.push_str(node);

            if on_path.contains(node) {
                output.push(' ');
                output.push_str(CIRCULAR_MARKER);
                output.push('\n');
                continue;
            }
            output.push('\n');

            let Some(children) = self.dependencies_of(node) else {
                continue;
            };

            on_path.insert(node);
            stack.push(RenderFrame::Leave(node));

            let child_prefix = if is_root {
                String::new()
            } else {
                format!("{}{}", prefix, if is_last { BLANK } else { PIPE })
            };

            let last_index = children.len().saturating_sub(1);
            for (index, child) in children.iter().enumerate().rev() {
                stack.push(RenderFrame::Enter {
                    node: child,
                    prefix: child_prefix.clone(),
                    is_last: index == last_index,
                    is_root: false,
                });
            }
        }

        Ok(output)
    }

    /// Exports the graph as a Graphviz `strict digraph`
    ///
    /// Edges are emitted sorted by (source, target). Cycle edges are restated
    /// with a highlight style after a commented cycle summary; in a strict
    /// graph the restatement merges into the original edge.
    pub fn export_diagram(&self) -> String {
        let mut output = String::from("strict digraph dependencies {\n");
        output.push_str("    rankdir=LR;\n");
        output.push_str("    node [shape=box];\n");

        let isolated: Vec<&str> = self
            .nodes()
            .filter(|node| self.dependencies_of(node).is_some_and(|d| d.is_empty()))
            .filter(|node| !self.edges().any(|(_, target)| target == *node))
            .collect();

        if !isolated.is_empty() {
            output.push('\n');
            for node in isolated {
                let _ = writeln!(output, "    {};", quote_id(node));
            }
        }

        if self.edge_count() > 0 {
            output.push('\n');
            for (source, target) in self.edges() {
                let _ = writeln!(output, "    {} -> {};", quote_id(source), quote_id(target));
            }
        }

        if self.has_cycles() {
            output.push('\n');
            let _ = writeln!(output, "    // Cycles detected: {}", self.cycles().len());
            for (index, cycle) in self.cycles().iter().enumerate() {
                let _ = writeln!(output, "    // Cycle {}: {}", index + 1, cycle);
                for (source, target) in cycle.edges() {
                    let _ = writeln!(
                        output,
                        "    {} -> {} {};",
                        quote_id(source),
                        quote_id(target),
                        CYCLE_EDGE_STYLE
                    );
                }
            }
        }

        output.push_str("}\n");
        output
    }
}

/// Quotes an id as a DOT string, escaping quotes and backslashes
fn quote_id(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for c in id.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
