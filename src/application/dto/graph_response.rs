use crate::dependency_graph::domain::DependencyGraph;
use std::path::PathBuf;

/// Where the dependency information for a build came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A `NODE: DEP ...` test repository file
    SyntheticRepository(PathBuf),
    /// A source tree on disk; the path is the root package's manifest
    SourceTree(PathBuf),
    /// A downloaded repository archive
    RemoteArchive(String),
}

/// GraphResponse - Internal response DTO from the graph building use case
#[derive(Debug, Clone)]
pub struct GraphResponse {
    /// The resolved graph
    pub graph: DependencyGraph,
    /// Root the graph was built from
    pub root: String,
    pub source: SourceKind,
}

impl GraphResponse {
    pub fn new(graph: DependencyGraph, root: String, source: SourceKind) -> Self {
        Self {
            graph,
            root,
            source,
        }
    }

    /// Whether the `--fail-on-cycles` gate should trip
    pub fn has_cycles(&self) -> bool {
        self.graph.has_cycles()
    }
}
