pub mod cycle;
pub mod dependency_edge;
pub mod dependency_graph;
pub mod package;
pub mod provider;
pub mod rendering;
pub mod synthetic_repository;

pub use cycle::DependencyCycle;
pub use dependency_edge::{DependencyEdge, ANY_VERSION};
pub use dependency_graph::DependencyGraph;
pub use package::PackageName;
pub use provider::DependencyProvider;
pub use rendering::{GraphError, CIRCULAR_MARKER};
pub use synthetic_repository::SyntheticRepository;
