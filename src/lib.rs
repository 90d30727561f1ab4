//! depviz - dependency graph visualizer for NuGet packages
//!
//! This library resolves the transitive dependency graph of a package from
//! package manifests, detects dependency cycles, answers reachability
//! queries in both directions and renders the result as an ASCII tree, a
//! Graphviz diagram, a flat list, statistics or JSON. It follows a
//! hexagonal architecture.
//!
//! # Architecture
//!
//! - **Domain Layer** (`dependency_graph`): the graph, the explicit-stack
//!   builder and rendering; pure logic, no I/O
//! - **Application Layer** (`application`): use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```
//! use depviz::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let repository = SyntheticRepository::parse("A: B C\nB: C\nC: A\n");
//! let graph = DependencyGraph::build("A", &repository, DEFAULT_MAX_DEPTH);
//!
//! assert!(graph.has_cycles());
//! assert_eq!(graph.transitive_dependents("C").len(), 2);
//!
//! let tree = TreeFormatter::new().format(&graph, "A")?;
//! assert!(tree.starts_with("A\n"));
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod dependency_graph;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        DiagramFormatter, JsonFormatter, ListFormatter, StatsFormatter, TreeFormatter,
    };
    pub use crate::adapters::outbound::manifest::NuGetManifestReader;
    pub use crate::adapters::outbound::network::{GitHubArchiveFetcher, NuGetClient};
    pub use crate::application::dto::{
        GraphRequest, GraphResponse, OutputMode, RepoMode, SourceKind,
    };
    pub use crate::application::use_cases::BuildGraphUseCase;
    pub use crate::dependency_graph::domain::{
        DependencyCycle, DependencyEdge, DependencyGraph, GraphError, PackageName,
        SyntheticRepository,
    };
    pub use crate::dependency_graph::services::{GraphBuilder, DEFAULT_MAX_DEPTH};
    pub use crate::ports::outbound::{
        DependencyProvider, GraphFormatter, ManifestReader, OutputPresenter, ProgressReporter,
        SourceFetcher, SyntheticRepositoryReader,
    };
    pub use crate::shared::Result;
}
